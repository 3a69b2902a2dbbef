//! Repository Layer
//!
//! CRUD seam over one record collection. Views talk to a `Repository`, so
//! the REST client can be swapped for the in-memory one in tests.

#[cfg(test)]
use std::cell::RefCell;

use async_trait::async_trait;

use super::client::ApiClient;
#[cfg(test)]
use super::error::ApiError;
use super::error::ApiResult;
use crate::domain::{Entity, RecordId};
use crate::session::SaveTarget;

/// CRUD over one collection
///
/// `create` and `update` return the record when the backend echoes it,
/// `None` when the caller has to refetch to see the result.
#[async_trait(?Send)]
pub trait Repository<T: Entity> {
    async fn list(&self) -> ApiResult<Vec<T>>;

    async fn create(&self, payload: &T::Payload) -> ApiResult<Option<T>>;

    async fn update(&self, id: &RecordId, payload: &T::Payload) -> ApiResult<Option<T>>;

    async fn delete(&self, id: &RecordId) -> ApiResult<()>;

    /// POST or PUT depending on where the save goes
    async fn save(&self, target: &SaveTarget, payload: &T::Payload) -> ApiResult<Option<T>> {
        match target {
            SaveTarget::Create => self.create(payload).await,
            SaveTarget::Update(id) => self.update(id, payload).await,
        }
    }
}

#[async_trait(?Send)]
impl<T: Entity> Repository<T> for ApiClient {
    async fn list(&self) -> ApiResult<Vec<T>> {
        ApiClient::list::<T>(self).await
    }

    async fn create(&self, payload: &T::Payload) -> ApiResult<Option<T>> {
        ApiClient::create::<T>(self, payload).await
    }

    async fn update(&self, id: &RecordId, payload: &T::Payload) -> ApiResult<Option<T>> {
        ApiClient::update::<T>(self, id, payload).await
    }

    async fn delete(&self, id: &RecordId) -> ApiResult<()> {
        ApiClient::delete::<T>(self, id).await
    }
}

/// Records kept in a `Vec`
///
/// Writes build the stored record from the payload through `make`, so the
/// in-memory backend echoes like a server that returns the saved row.
#[cfg(test)]
pub struct MemoryRepository<T: Entity> {
    records: RefCell<Vec<T>>,
    next_id: RefCell<u64>,
    make: fn(RecordId, &T::Payload) -> T,
}

#[cfg(test)]
impl<T: Entity> MemoryRepository<T> {
    pub fn new(make: fn(RecordId, &T::Payload) -> T) -> Self {
        Self::with_records(Vec::new(), make)
    }

    pub fn with_records(records: Vec<T>, make: fn(RecordId, &T::Payload) -> T) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id().as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            records: RefCell::new(records),
            next_id: RefCell::new(next_id),
            make,
        }
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.records.borrow().clone()
    }

    fn not_found(id: &RecordId) -> ApiError {
        ApiError::status(404, format!("{} {} não encontrado", T::COLLECTION, id))
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn list(&self) -> ApiResult<Vec<T>> {
        Ok(self.snapshot())
    }

    async fn create(&self, payload: &T::Payload) -> ApiResult<Option<T>> {
        let id = {
            let mut next = self.next_id.borrow_mut();
            let id = RecordId::new(next.to_string());
            *next += 1;
            id
        };
        let record = (self.make)(id, payload);
        self.records.borrow_mut().push(record.clone());
        Ok(Some(record))
    }

    async fn update(&self, id: &RecordId, payload: &T::Payload) -> ApiResult<Option<T>> {
        let mut records = self.records.borrow_mut();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = (self.make)(id.clone(), payload);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &RecordId) -> ApiResult<()> {
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
