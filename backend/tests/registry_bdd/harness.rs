//! Server harness and shared world for the registry behaviour suite.
//!
//! Actix spawns its workers with `spawn_local`, so the world owns a
//! single-threaded Tokio runtime plus a `LocalSet`. Dropping the
//! `WorldFixture` stops the server even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use registry::Trace;
use registry::domain::UsersService;
use registry::inbound::http::state::HttpState;
use registry::inbound::http::users;
use registry::inbound::http::validation::json_config;
use registry::outbound::persistence::InMemoryUserRepository;

pub(crate) struct RegistryWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    /// Identifiers handed out by the server, in creation order.
    pub(crate) created_ids: Vec<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<RegistryWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // The future must not borrow the world: it stays borrowed while the
    // `LocalSet` is driven.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn registry_state() -> HttpState {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(UsersService::new(repo));
    HttpState::new(service.clone(), service)
}

async fn spawn_registry_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(json_config())
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(users::configure))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    (runtime, LocalSet::new())
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let (base_url, server) = local
        .block_on(&runtime, async {
            spawn_registry_server(registry_state()).await
        })
        .expect("server should start");

    let world = Rc::new(RefCell::new(RegistryWorld {
        runtime,
        local,
        base_url,
        server,
        last_status: None,
        last_body: None,
        last_trace_id: None,
        created_ids: Vec::new(),
    }));

    WorldFixture { world }
}
