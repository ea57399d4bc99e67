mod access_ids;
mod connection_test;
mod schema;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/database")
            .configure(access_ids::init_routes)
            .configure(connection_test::init_routes)
            .configure(schema::init_routes),
    );
}
