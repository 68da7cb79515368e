use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // 问卷页与后台页由独立的静态站点提供
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
