//! In-process implementation of the document repository.
//!
//! Backs the test suites and `STORE_BACKEND=memory`. Data lives only as long
//! as the process.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::document::{
    Collection, Direction, Document, Fields, GuardedInsert, GuardedOutcome, Query,
    compare_values,
};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::id_generator::generate_document_id;
use crate::utils::timestamp::Timestamp;

type Store = HashMap<Collection, BTreeMap<String, Fields>>;

/// Document store held in memory behind a single lock.
#[derive(Default)]
pub struct MemoryDocumentRepository {
    store: RwLock<Store>,
}

impl MemoryDocumentRepository {
    pub fn new() -> Self {
        debug!("Using in-memory document store");
        Self::default()
    }
}

fn order_documents(docs: &mut [Document], field: &str, direction: Direction) {
    docs.sort_by(|a, b| match (a.get(field), b.get(field)) {
        (Some(x), Some(y)) => match direction {
            Direction::Asc => compare_values(x, y),
            Direction::Desc => compare_values(y, x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn insert_new(store: &mut Store, collection: Collection, fields: Fields) -> Document {
    let id = generate_document_id();
    store
        .entry(collection)
        .or_default()
        .insert(id.clone(), fields.clone());
    Document::new(id, fields)
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, AppError> {
        let store = self.store.read().await;
        Ok(store
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn query(&self, collection: Collection, query: Query) -> Result<Vec<Document>, AppError> {
        let store = self.store.read().await;
        let mut docs: Vec<Document> = store
            .get(&collection)
            .into_iter()
            .flat_map(|docs| docs.iter())
            .filter(|(_, fields)| query.matches(fields))
            .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
            .collect();

        if let Some(order) = &query.order_by {
            order_documents(&mut docs, &order.field, order.direction);
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }

        Ok(docs)
    }

    async fn count(&self, collection: Collection) -> Result<u64, AppError> {
        let store = self.store.read().await;
        Ok(store.get(&collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn add(&self, collection: Collection, fields: Fields) -> Result<Document, AppError> {
        let mut store = self.store.write().await;
        Ok(insert_new(&mut store, collection, fields))
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, AppError> {
        let mut store = self.store.write().await;
        let Some(fields) = store.get_mut(&collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(None);
        };

        fields.extend(patch);
        Ok(Some(Document::new(id, fields.clone())))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        Ok(store
            .get_mut(&collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }

    async fn insert_guarded(&self, insert: GuardedInsert) -> Result<GuardedOutcome, AppError> {
        let GuardedInsert {
            collection,
            data,
            unique_on,
            counter,
        } = insert;

        let mut store = self.store.write().await;

        let parent_exists = store
            .get(&counter.collection)
            .is_some_and(|docs| docs.contains_key(&counter.id));
        if !parent_exists {
            return Ok(GuardedOutcome::ParentMissing);
        }

        let duplicate = store.get(&collection).is_some_and(|docs| {
            docs.values()
                .any(|fields| unique_on.iter().all(|f| f.matches(fields)))
        });
        if duplicate {
            return Ok(GuardedOutcome::Duplicate);
        }

        let document = insert_new(&mut store, collection, data);

        if let Some(parent) = store
            .get_mut(&counter.collection)
            .and_then(|docs| docs.get_mut(&counter.id))
        {
            let current = parent
                .get(&counter.field)
                .and_then(Value::as_u64)
                .unwrap_or(0);
            parent.insert(counter.field.clone(), Value::from(current + 1));
            parent.insert(
                "updatedAt".to_string(),
                Value::String(Timestamp::now().to_string()),
            );
        }

        Ok(GuardedOutcome::Inserted(document))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
