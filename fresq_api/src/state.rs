use std::sync::Arc;

use fresq_core::{
    ngo::NgoSite,
    order::{Order, Vehicle},
    stop::{LocationLookup, Stop},
};
use fresq_dispatch::{resolver::RouteResolver, route_service::OsrmGeometryService};
use tokio::sync::{OnceCell, RwLock};

use crate::{optimizer::OptimizerClient, store::StoreClient};

pub struct AppState {
    pub store: StoreClient,
    pub optimizer: OptimizerClient,
    pub resolver: RouteResolver<OsrmGeometryService>,
    /// Recipient organizations are static for the session: fetched once,
    /// never recomputed on route changes.
    pub ngo_sites: OnceCell<Vec<NgoSite>>,
    pub session: RwLock<Session>,
}

impl AppState {
    pub fn from_env() -> Self {
        Self {
            store: StoreClient::from_env(),
            optimizer: OptimizerClient::from_env(),
            resolver: RouteResolver::new(OsrmGeometryService::from_env()),
            ngo_sites: OnceCell::new(),
            session: RwLock::new(Session::default()),
        }
    }
}

/// The authoritative dashboard state. Every field is replaced wholesale
/// on update (the `Arc`s are swapped, their contents never edited), so a
/// reader can never observe a half-updated lookup or stop list.
#[derive(Default)]
pub struct Session {
    pub vehicle: Option<Vehicle>,
    pub orders: Arc<Vec<Order>>,
    pub lookup: Arc<LocationLookup>,
    pub stops: Arc<Vec<Stop>>,
    pub total_distance: f64,
}
