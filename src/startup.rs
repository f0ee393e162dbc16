use crate::chat;
use crate::configuration::Settings;
use crate::routes;
use actix::Actor;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    // One router per process; every websocket session talks to it.
    let chat_server = web::Data::new(chat::ChatServer::new().start());

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/chat")
                    // literal paths before the `{email}` catch-all
                    .service(routes::chat::admin_list)
                    .service(routes::chat::add)
                    .service(routes::chat::thread),
            )
            .service(
                web::scope("/appointments")
                    .service(routes::appointment::add)
                    .service(routes::appointment::list)
                    .service(routes::appointment::by_date)
                    .service(routes::appointment::set_status)
                    .service(routes::appointment::cancel)
                    .service(routes::appointment::by_email),
            )
            .service(web::scope("/finance").service(routes::finance::report))
            .service(web::scope("/config").service(routes::config::list))
            .service(
                web::scope("/admin")
                    .service(
                        web::scope("/appointments").service(routes::appointment::purge),
                    )
                    .service(web::scope("/config").service(routes::config::upsert)),
            )
            .service(web::resource("/ws").route(web::get().to(chat::chat_websocket)))
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(chat_server.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
