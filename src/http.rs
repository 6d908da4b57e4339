use std::io::Write;
use std::net::SocketAddr;

use axum::Extension;
use hyper::Server;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::global_context::SharedGlobalContext;
use crate::http::routers::make_blog_http_server;

pub mod routers;
pub mod utils;


async fn _wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("cannot listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("ctrl-c received, shutting down");
}

pub async fn start_server(gcx: SharedGlobalContext) -> Option<JoinHandle<()>> {
    let (port, is_inside_container) = {
        let gcx_locked = gcx.read().await;
        (gcx_locked.cmdline.http_port, gcx_locked.cmdline.inside_container)
    };
    if port == 0 {
        return None
    }
    Some(tokio::spawn(async move {
        let addr: SocketAddr = if is_inside_container { ([0, 0, 0, 0], port).into() } else { ([127, 0, 0, 1], port).into() };
        let builder = Server::try_bind(&addr).map_err(|e| {
            let _ = write!(std::io::stderr(), "PORT_BUSY {}\n", e);
            format!("port busy, address {}: {}", addr, e)
        });
        match builder {
            Ok(builder) => {
                info!("HTTP server listening on {}", addr);
                let router = make_blog_http_server().layer(Extension(gcx.clone()));
                let server = builder
                    .serve(router.into_make_service())
                    .with_graceful_shutdown(_wait_for_ctrl_c());
                let resp = server.await.map_err(|e| format!("HTTP server error: {}", e));
                if let Err(e) = resp {
                    error!("server error: {}", e);
                } else {
                    info!("clean shutdown");
                }
            }
            Err(e) => {
                error!("server error: {}", e);
            }
        }
    }))
}
