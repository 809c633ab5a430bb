//! Property-based tests for the object service.

use std::sync::Arc;

use bytes::Bytes;
use imgstore_shared::StorageProvider;
use proptest::prelude::*;

use super::ObjectService;
use crate::storage::{MemoryBlobStore, StorageService};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

proptest! {
    /// Round-trip: retrieve(store(B, F, T)) == (B, F, T) for any bytes B,
    /// including the empty sequence.
    #[test]
    fn prop_store_retrieve_roundtrip(
        body in prop_oneof![
            proptest::collection::vec(any::<u8>(), 0..4096),
            proptest::collection::vec(any::<u8>(), 0..256).prop_map(|tail| {
                let mut body = b"IMGSTOR\x01".to_vec();
                body.extend(tail);
                body
            }),
        ],
        filename in "[^\\x00]{1,64}",
        content_type in "(image|application|text)/[a-z0-9.+-]{1,20}",
    ) {
        let rt = runtime();
        let memory = ObjectService::new(Arc::new(MemoryBlobStore::new()));
        let opendal = ObjectService::new(Arc::new(
            StorageService::from_config(&StorageProvider::Memory).unwrap(),
        ));

        let (from_memory, from_opendal) = rt.block_on(async {
            let payload = Bytes::from(body.clone());
            let a = memory.store(payload.clone(), &filename, &content_type).await.unwrap();
            let b = opendal.store(payload, &filename, &content_type).await.unwrap();
            (
                memory.retrieve(&a.to_string()).await.unwrap(),
                opendal.retrieve(&b.to_string()).await.unwrap(),
            )
        });

        for obj in [from_memory, from_opendal] {
            prop_assert_eq!(obj.bytes.as_ref(), body.as_slice());
            prop_assert_eq!(&obj.filename, &filename);
            prop_assert_eq!(&obj.content_type, &content_type);
        }
    }

    /// Whatever the input, a non-identifier is rejected as malformed.
    #[test]
    fn prop_garbage_ids_are_malformed(input in "[^-]{0,64}") {
        let rt = runtime();
        let service = ObjectService::new(Arc::new(MemoryBlobStore::new()));

        let result = rt.block_on(service.retrieve(&input));
        prop_assert!(matches!(result, Err(super::ObjectError::Malformed(_))));
    }
}
