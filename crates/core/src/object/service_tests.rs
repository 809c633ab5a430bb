//! Access layer behavior against in-memory and stub stores.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use futures::future::join_all;
use imgstore_shared::{ObjectId, StorageProvider};

use super::*;
use crate::storage::{
    Blob, BlobMetadata, BlobStore, MemoryBlobStore, StorageError, StorageService,
};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

fn memory_service() -> ObjectService<MemoryBlobStore> {
    ObjectService::new(Arc::new(MemoryBlobStore::new()))
}

/// Fails the test on any store access.
struct PanicBlobStore;

impl BlobStore for PanicBlobStore {
    async fn put(&self, key: &str, _: Bytes, _: BlobMetadata) -> Result<(), StorageError> {
        panic!("store touched: put {key}")
    }

    async fn get(&self, key: &str) -> Result<Option<Blob>, StorageError> {
        panic!("store touched: get {key}")
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        panic!("store touched: delete {key}")
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        panic!("store touched: list")
    }
}

/// Rejects every operation.
struct FailingBlobStore;

impl BlobStore for FailingBlobStore {
    async fn put(&self, _: &str, _: Bytes, _: BlobMetadata) -> Result<(), StorageError> {
        Err(StorageError::operation("disk full"))
    }

    async fn get(&self, _: &str) -> Result<Option<Blob>, StorageError> {
        Err(StorageError::operation("connection reset"))
    }

    async fn delete(&self, _: &str) -> Result<bool, StorageError> {
        Err(StorageError::operation("connection reset"))
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::operation("connection reset"))
    }
}

/// Claims every key is taken.
struct OccupiedBlobStore;

impl BlobStore for OccupiedBlobStore {
    async fn put(&self, key: &str, _: Bytes, _: BlobMetadata) -> Result<(), StorageError> {
        Err(StorageError::already_exists(key))
    }

    async fn get(&self, _: &str) -> Result<Option<Blob>, StorageError> {
        Ok(None)
    }

    async fn delete(&self, _: &str) -> Result<bool, StorageError> {
        Ok(false)
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }
}

async fn jpeg_lifecycle<S: BlobStore>(service: &ObjectService<S>) {
    let id = service
        .store(Bytes::from_static(JPEG), "cat.jpg", "image/jpeg")
        .await
        .expect("store should succeed");

    assert!(service.list_all().await.unwrap().contains(&id));

    let obj = service.retrieve(&id.to_string()).await.unwrap();
    assert_eq!(obj.bytes.as_ref(), JPEG);
    assert_eq!(obj.filename, "cat.jpg");
    assert_eq!(obj.content_type, "image/jpeg");

    service.delete(&id.to_string()).await.unwrap();

    let err = service.retrieve(&id.to_string()).await.unwrap_err();
    assert!(matches!(err, ObjectError::NotFound(found) if found == id));
    assert!(!service.list_all().await.unwrap().contains(&id));
}

#[tokio::test]
async fn test_jpeg_lifecycle_in_memory() {
    jpeg_lifecycle(&memory_service()).await;
}

#[tokio::test]
async fn test_jpeg_lifecycle_opendal_memory() {
    let store = StorageService::from_config(&StorageProvider::Memory).unwrap();
    jpeg_lifecycle(&ObjectService::new(Arc::new(store))).await;
}

#[tokio::test]
async fn test_empty_payload_accepted() {
    let service = memory_service();
    let id = service
        .store(Bytes::new(), "empty.bin", "application/x-empty")
        .await
        .unwrap();

    let obj = service.retrieve(&id.to_string()).await.unwrap();
    assert!(obj.bytes.is_empty());
    assert_eq!(obj.filename, "empty.bin");
    assert_eq!(obj.content_type, "application/x-empty");
}

#[tokio::test]
async fn test_envelope_shaped_payload_roundtrips() {
    let payload = Bytes::from_static(b"IMGSTOR\x01\0\0\0\x02{}hello");
    let opendal = StorageService::from_config(&StorageProvider::Memory).unwrap();

    for obj in [
        roundtrip(&memory_service(), payload.clone()).await,
        roundtrip(&ObjectService::new(Arc::new(opendal)), payload.clone()).await,
    ] {
        assert_eq!(obj.bytes, payload);
        assert_eq!(obj.filename, "trap.bin");
        assert_eq!(obj.content_type, "image/png");
    }
}

async fn roundtrip<S: BlobStore>(service: &ObjectService<S>, payload: Bytes) -> StoredObject {
    let id = service.store(payload, "trap.bin", "image/png").await.unwrap();
    service.retrieve(&id.to_string()).await.unwrap()
}

#[tokio::test]
async fn test_missing_metadata_falls_back() {
    let service = memory_service();
    let id = service.store(Bytes::from_static(b"raw"), "", "").await.unwrap();

    let obj = service.retrieve(&id.to_string()).await.unwrap();
    assert_eq!(obj.filename, DEFAULT_FILENAME);
    assert_eq!(obj.content_type, DEFAULT_CONTENT_TYPE);
}

#[tokio::test]
async fn test_malformed_never_touches_store() {
    let service = ObjectService::new(Arc::new(PanicBlobStore));

    for input in ["", "not-a-uuid", "123", "../etc/passwd"] {
        let err = service.retrieve(input).await.unwrap_err();
        assert!(matches!(err, ObjectError::Malformed(ref s) if s == input));

        let err = service.delete(input).await.unwrap_err();
        assert!(matches!(err, ObjectError::Malformed(ref s) if s == input));
    }
}

#[tokio::test]
async fn test_retrieve_unknown_is_not_found() {
    let service = memory_service();
    let id = ObjectId::new();

    let err = service.retrieve(&id.to_string()).await.unwrap_err();
    assert!(matches!(err, ObjectError::NotFound(found) if found == id));
}

#[tokio::test]
async fn test_uppercase_identifier_resolves() {
    let service = memory_service();
    let id = service
        .store(Bytes::from_static(b"x"), "x.png", "image/png")
        .await
        .unwrap();

    let obj = service
        .retrieve(&id.to_string().to_uppercase())
        .await
        .unwrap();
    assert_eq!(obj.bytes, Bytes::from_static(b"x"));
}

#[tokio::test]
async fn test_second_delete_is_not_found() {
    let service = memory_service();
    let id = service
        .store(Bytes::from_static(b"x"), "x.png", "image/png")
        .await
        .unwrap();

    service.delete(&id.to_string()).await.unwrap();
    let err = service.delete(&id.to_string()).await.unwrap_err();
    assert!(matches!(err, ObjectError::NotFound(found) if found == id));
}

#[tokio::test]
async fn test_delete_never_stored_is_not_found() {
    let service = memory_service();
    let err = service.delete(&ObjectId::new().to_string()).await.unwrap_err();
    assert!(matches!(err, ObjectError::NotFound(_)));
}

#[tokio::test]
async fn test_write_failure_leaves_no_record() {
    let service = ObjectService::new(Arc::new(FailingBlobStore));
    let err = service
        .store(Bytes::from_static(JPEG), "cat.jpg", "image/jpeg")
        .await
        .unwrap_err();
    assert!(matches!(err, ObjectError::StoreWriteFailed(_)));
}

#[tokio::test]
async fn test_read_failures_surface() {
    let service = ObjectService::new(Arc::new(FailingBlobStore));
    let id = ObjectId::new().to_string();

    assert!(matches!(
        service.retrieve(&id).await,
        Err(ObjectError::StoreReadFailed(_))
    ));
    assert!(matches!(
        service.list_all().await,
        Err(ObjectError::StoreReadFailed(_))
    ));
    assert!(matches!(
        service.delete(&id).await,
        Err(ObjectError::StoreWriteFailed(_))
    ));
}

#[tokio::test]
async fn test_identifier_collision_is_not_an_overwrite() {
    let service = ObjectService::new(Arc::new(OccupiedBlobStore));
    let err = service
        .store(Bytes::from_static(b"x"), "x.png", "image/png")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ObjectError::StoreWriteFailed(StorageError::AlreadyExists { .. })
    ));
}

#[tokio::test]
async fn test_list_all_skips_foreign_keys() {
    let store = Arc::new(MemoryBlobStore::new());
    store
        .put("thumbs.db", Bytes::from_static(b"junk"), BlobMetadata::default())
        .await
        .unwrap();
    let service = ObjectService::new(Arc::clone(&store));

    let id = service
        .store(Bytes::from_static(b"x"), "x.png", "image/png")
        .await
        .unwrap();

    assert_eq!(service.list_all().await.unwrap(), vec![id]);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_list_all_returns_every_live_object() {
    let service = memory_service();
    let mut expected = HashSet::new();
    for i in 0..5u8 {
        let id = service
            .store(Bytes::from(vec![i]), "x.png", "image/png")
            .await
            .unwrap();
        expected.insert(id);
    }

    let listed: HashSet<ObjectId> = service.list_all().await.unwrap().into_iter().collect();
    assert_eq!(listed, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stores_are_independent() {
    let service = memory_service();

    let payloads: Vec<Bytes> = (0..32u8).map(|i| Bytes::from(vec![i; 64])).collect();
    let tasks = payloads.iter().cloned().map(|payload| {
        let service = service.clone();
        tokio::spawn(async move { service.store(payload, "p.bin", "image/png").await })
    });

    let ids: Vec<ObjectId> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("store failed"))
        .collect();

    let unique: HashSet<&ObjectId> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());

    for (id, payload) in ids.iter().zip(&payloads) {
        let obj = service.retrieve(&id.to_string()).await.unwrap();
        assert_eq!(&obj.bytes, payload);
    }
}
