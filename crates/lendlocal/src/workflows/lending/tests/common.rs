use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::lending::domain::{
    BorrowerId, CommunityId, FundingRequest, Lender, LenderId, MatchId, RosterFilter,
};
use crate::workflows::lending::engine::{EngineConfig, MatchingEngine};
use crate::workflows::lending::repository::{
    DirectoryError, LenderDirectory, MatchRecord, MatchRepository, RepositoryError,
};
use crate::workflows::lending::service::LoanMatchingService;

pub(super) fn lender(id: &str, capital: f64, rate: f64) -> Lender {
    Lender {
        id: LenderId(id.to_string()),
        capital,
        rate,
    }
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(EngineConfig::default())
}

pub(super) fn community() -> CommunityId {
    CommunityId("princeton-nj".to_string())
}

pub(super) fn funding_request(amount: f64, ceiling: f64) -> FundingRequest {
    FundingRequest {
        borrower_id: BorrowerId("user_borrower1".to_string()),
        requested_amount: amount,
        capacity_ceiling: ceiling,
        filter: RosterFilter {
            community: Some(community()),
            require_location_verified: false,
        },
    }
}

/// Directory entry as the in-memory double stores it.
#[derive(Debug, Clone)]
pub(super) struct ListedLender {
    pub(super) lender: Lender,
    pub(super) community: CommunityId,
    pub(super) location_verified: bool,
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    listings: Arc<Mutex<Vec<ListedLender>>>,
}

impl MemoryDirectory {
    pub(super) fn publish(&self, listing: ListedLender) {
        self.listings
            .lock()
            .expect("directory mutex poisoned")
            .push(listing);
    }
}

impl LenderDirectory for MemoryDirectory {
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
pub(super) struct MemoryMatches {
    pub(super) records: Arc<Mutex<HashMap<MatchId, MatchRecord>>>,
}

impl MatchRepository for MemoryMatches {
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

pub(super) struct UnavailableMatches;

impl MatchRepository for UnavailableMatches {
    fn insert(&self, _record: MatchRecord) -> Result<MatchRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &MatchId) -> Result<Option<MatchRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Five verified lenders in the default community, rates ascending, none
/// able to cover 1500 alone.
pub(super) fn seed_roster(directory: &MemoryDirectory) {
    let seeds = [
        ("user_aa11bb22", 600.0, 3.0),
        ("user_cc33dd44", 500.0, 3.5),
        ("user_ee55ff66", 400.0, 4.0),
        ("user_gg77hh88", 300.0, 4.5),
        ("user_ii99jj00", 200.0, 5.0),
    ];
    for (id, capital, rate) in seeds {
        directory.publish(ListedLender {
            lender: lender(id, capital, rate),
            community: community(),
            location_verified: true,
        });
    }
}

pub(super) fn build_service() -> (
    LoanMatchingService<MemoryDirectory, MemoryMatches>,
    Arc<MemoryDirectory>,
    Arc<MemoryMatches>,
) {
    let directory = Arc::new(MemoryDirectory::default());
    let matches = Arc::new(MemoryMatches::default());
    let service = LoanMatchingService::new(
        directory.clone(),
        matches.clone(),
        EngineConfig::default(),
    );
    (service, directory, matches)
}
