use rand::Rng;

/// 生成奖品ID（8 个随机字节的十六进制表示）
pub fn generate_prize_id() -> String {
    let bytes: [u8; 8] = rand::thread_rng().r#gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
