//! Cached reference data (employees and locations) for request handlers.
//!
//! Both lists change rarely but are read on almost every preview and shift
//! request, so they are cached with a short TTL. Mutations through the team
//! services call [`ReferenceCache::invalidate`] so readers never see a
//! stale entry after a write from this process.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::domain::models::employee::Employee;
use crate::domain::models::location::Location;
use crate::storage::{EmployeeRepository, LocationRepository};

const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Time source for cache expiry. Production uses [`SystemClock`]; tests
/// drive expiry with a manual clock instead of sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CachedList<T> {
    items: Vec<T>,
    fetched_at: Instant,
}

#[derive(Default)]
struct CacheState {
    employees: Option<CachedList<Employee>>,
    locations: Option<CachedList<Location>>,
}

#[derive(Clone)]
pub struct ReferenceCache {
    employee_repository: EmployeeRepository,
    location_repository: LocationRepository,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: Arc<Mutex<CacheState>>,
}

impl ReferenceCache {
    pub fn new(
        employee_repository: EmployeeRepository,
        location_repository: LocationRepository,
    ) -> Self {
        Self::with_clock(
            employee_repository,
            location_repository,
            Arc::new(SystemClock),
            DEFAULT_TTL,
        )
    }

    pub fn with_clock(
        employee_repository: EmployeeRepository,
        location_repository: LocationRepository,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            employee_repository,
            location_repository,
            clock,
            ttl,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    pub async fn employees(&self) -> Result<Vec<Employee>> {
        if let Some(items) = self.fresh(|state| &state.employees) {
            return Ok(items);
        }
        let items = self.employee_repository.list_employees().await?;
        debug!("Employee cache refreshed: {} entries", items.len());
        let mut state = self.state.lock().unwrap();
        state.employees = Some(CachedList {
            items: items.clone(),
            fetched_at: self.clock.now(),
        });
        Ok(items)
    }

    pub async fn locations(&self) -> Result<Vec<Location>> {
        if let Some(items) = self.fresh(|state| &state.locations) {
            return Ok(items);
        }
        let items = self.location_repository.list_locations().await?;
        debug!("Location cache refreshed: {} entries", items.len());
        let mut state = self.state.lock().unwrap();
        state.locations = Some(CachedList {
            items: items.clone(),
            fetched_at: self.clock.now(),
        });
        Ok(items)
    }

    pub async fn employee_name(&self, employee_id: &str) -> Result<Option<String>> {
        let employees = self.employees().await?;
        Ok(employees
            .into_iter()
            .find(|e| e.id == employee_id)
            .map(|e| e.name))
    }

    pub async fn location_name(&self, location_id: &str) -> Result<Option<String>> {
        let locations = self.locations().await?;
        Ok(locations
            .into_iter()
            .find(|l| l.id == location_id)
            .map(|l| l.name))
    }

    /// Drop both cached lists. Called after any employee or location
    /// mutation.
    pub fn invalidate(&self) {
        let mut state = self.state.lock().unwrap();
        state.employees = None;
        state.locations = None;
        debug!("Reference cache invalidated");
    }

    fn fresh<T: Clone>(&self, select: impl Fn(&CacheState) -> &Option<CachedList<T>>) -> Option<Vec<T>> {
        let state = self.state.lock().unwrap();
        let cached = select(&state).as_ref()?;
        if self.clock.now().duration_since(cached.fetched_at) < self.ttl {
            Some(cached.items.clone())
        } else {
            None
        }
    }
}
