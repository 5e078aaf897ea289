mod appointment;
mod binding;
mod chat;
mod error;
mod job_schedulers;
mod medication;
mod notifications;
mod pdf;
mod preferences;
mod prescription;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::JobSchedulersHandle;
use mediconnect_infra::MediconnectContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    appointment::configure_routes(cfg);
    binding::configure_routes(cfg);
    chat::configure_routes(cfg);
    medication::configure_routes(cfg);
    preferences::configure_routes(cfg);
    prescription::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    jobs: JobSchedulersHandle,
}

impl Application {
    pub async fn new(context: MediconnectContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let jobs = job_schedulers::start_job_schedulers(context);

        Ok(Self { server, port, jobs })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: MediconnectContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.jobs.stop();
        res
    }
}
