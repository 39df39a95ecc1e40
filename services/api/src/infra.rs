use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use lendlocal::workflows::lending::{
    CommunityId, DirectoryError, EngineConfig, Lender, LenderDirectory, LenderId, MatchId,
    MatchRecord, MatchRepository, RepositoryError, RosterFilter,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One lender as the directory stores it: the matching-relevant fields
/// plus the eligibility attributes the roster filter checks.
#[derive(Debug, Clone)]
pub(crate) struct LenderListing {
    pub(crate) lender: Lender,
    pub(crate) community: CommunityId,
    pub(crate) location_verified: bool,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLenderDirectory {
    listings: Arc<Mutex<Vec<LenderListing>>>,
}

impl InMemoryLenderDirectory {
    pub(crate) fn publish(&self, listing: LenderListing) {
        self.listings
            .lock()
            .expect("directory mutex poisoned")
            .push(listing);
    }
}

impl LenderDirectory for InMemoryLenderDirectory {
    fn eligible_lenders(&self, filter: &RosterFilter) -> Result<Vec<Lender>, DirectoryError> {
        let listings = self.listings.lock().expect("directory mutex poisoned");
        Ok(listings
            .iter()
            .filter(|listing| listing.lender.capital > 0.0)
            .filter(|listing| match &filter.community {
                Some(community) => &listing.community == community,
                None => true,
            })
            .filter(|listing| !filter.require_location_verified || listing.location_verified)
            .map(|listing| listing.lender.clone())
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryMatchRepository {
    records: Arc<Mutex<HashMap<MatchId, MatchRecord>>>,
}

impl MatchRepository for InMemoryMatchRepository {
    fn insert(&self, record: MatchRecord) -> Result<MatchRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &MatchId) -> Result<Option<MatchRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn default_engine_config() -> EngineConfig {
    EngineConfig::default()
}

pub(crate) const DEMO_COMMUNITY: &str = "princeton-nj";

/// Sample community roster used by the demo and the `--seed-demo` serve
/// flag: five verified lenders with ascending floor rates.
pub(crate) fn seed_demo_roster(directory: &InMemoryLenderDirectory) {
    let seeds = [
        ("user_ab12cd34", 600.0, 3.0),
        ("user_ef56gh78", 500.0, 3.5),
        ("user_ij90kl12", 400.0, 4.0),
        ("user_mn34op56", 300.0, 4.5),
        ("user_qr78st90", 200.0, 5.0),
    ];
    for (id, capital, rate) in seeds {
        directory.publish(LenderListing {
            lender: Lender {
                id: LenderId(id.to_string()),
                capital,
                rate,
            },
            community: CommunityId(DEMO_COMMUNITY.to_string()),
            location_verified: true,
        });
    }
}
