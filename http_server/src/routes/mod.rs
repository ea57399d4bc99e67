mod database;
mod health;
mod scores;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init_routes).service(
        web::scope("/api")
            .configure(database::init_routes)
            .configure(scores::init_routes),
    );
}
