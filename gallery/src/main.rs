mod config;
mod controller;
mod render;
mod session;
mod util;
mod view;

use crate::config::{Lightbox, read_config};
use crate::controller::{Gallery, Outcome, SessionId};
use crate::session::Generation;
use crate::view::Patches;
use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{App, HttpServer, Responder, get, post, web};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tokio::sync::oneshot;

#[macro_use]
extern crate log;

type PixabayGallery = Gallery<pixabay::Client>;

#[derive(Debug)]
struct Site {
    static_dir: PathBuf,
    client: ClientConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfig {
    page_size: u32,
    lightbox: Lightbox,
}

#[derive(Deserialize, Debug)]
struct SearchPayload {
    session: SessionId,
    keyword: String,
}

#[derive(Deserialize, Debug)]
struct MorePayload {
    session: SessionId,
    generation: Generation,
}

#[derive(Serialize, Debug)]
struct PatchResponse {
    generation: Generation,
    patches: Patches,
}

fn respond(what: &str, session: SessionId, outcome: Outcome, patches: Patches) -> PatchResponse {
    match &outcome.result {
        Ok(l) => debug!(
            "{} {}: generation {} page {} ({}/{})",
            what, session, outcome.generation, l.page, l.fetched, l.total
        ),
        Err(e) => log!(e.level(), "{} {}: {}", what, session, e),
    }
    PatchResponse {
        generation: outcome.generation,
        patches,
    }
}

#[get("/")]
async fn index(site: web::Data<Site>) -> io::Result<NamedFile> {
    NamedFile::open_async(site.static_dir.join("index.html")).await
}

#[get("/api/config")]
async fn client_config(site: web::Data<Site>) -> impl Responder {
    web::Json(site.client.clone())
}

#[post("/api/search")]
async fn search(
    app: web::Data<PixabayGallery>,
    payload: web::Json<SearchPayload>,
) -> impl Responder {
    let mut patches = Patches::default();
    let outcome = app
        .submit_search(payload.session, &payload.keyword, &mut patches)
        .await;
    web::Json(respond("search", payload.session, outcome, patches))
}

#[post("/api/more")]
async fn more(app: web::Data<PixabayGallery>, payload: web::Json<MorePayload>) -> impl Responder {
    let mut patches = Patches::default();
    let outcome = app
        .load_more(payload.session, payload.generation, &mut patches)
        .await;
    web::Json(respond("more", payload.session, outcome, patches))
}

#[actix_web::main] // or #[tokio::main]
async fn main() -> Result<()> {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&filters)
        .init();
    info!("gallery {}", env!("CARGO_PKG_VERSION"));

    let conf = read_config()?;
    info!("config: {:?}", conf);
    let client = pixabay::Client::with_options(
        conf.key.as_str(),
        conf.api_host.as_deref(),
        conf.proxy.as_deref(),
    )?;
    let data = web::Data::new(Gallery::new(client, conf.max_sessions)?);
    let site = web::Data::new(Site {
        static_dir: conf.static_dir.clone(),
        client: ClientConfig {
            page_size: pixabay::PER_PAGE,
            lightbox: conf.lightbox.clone(),
        },
    });

    let static_dir = conf.static_dir;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .app_data(site.clone())
            .service(index)
            .service(client_config)
            .service(search)
            .service(more)
            .service(Files::new("/static", &static_dir))
    })
    .bind(conf.addr)?
    .disable_signals()
    .run();
    let handle = server.handle();
    info!("listening on http://{}", conf.addr);

    let (tx, mut rx) = oneshot::channel();
    let mut tx = Some(tx);
    ctrlc::set_handler(move || match tx.take() {
        Some(tx) => {
            if tx.send(()).is_err() {
                error!("failed to invoke shutdown");
            } else {
                warn!("shutting down");
            }
        }
        None => {
            warn!("is shutting down");
        }
    })?;

    tokio::select! {
        _ = server => {
            critical!("server terminated unexpectedly");
        },
        _ = &mut rx => {}
    }
    info!("shutting down server");
    handle.stop(true).await;
    Ok(())
}
