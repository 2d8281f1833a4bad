use signing_ledger::{
    ContentHash, DocumentId, DocumentStore, Identity, NoopSink, StoreError, StoreErrorKind,
};

fn id(s: &str) -> Identity {
    Identity::new(s)
}

fn ids(names: &[&str]) -> Vec<Identity> {
    names.iter().map(|n| Identity::new(*n)).collect()
}

fn store() -> DocumentStore<NoopSink> {
    DocumentStore::default()
}

#[test]
fn invariant_monotonic_ids() {
    let store = store();

    let assigned: Vec<u64> = (0..10)
        .map(|i| {
            store
                .create(id("creator"), ContentHash::new(format!("hash-{i}")), ids(&["a"]))
                .value()
        })
        .collect();

    assert_eq!(assigned, (0..10).collect::<Vec<u64>>());
    assert_eq!(store.count(), 10);
}

#[test]
fn invariant_round_trip_after_create() {
    let store = store();
    let hash = ContentHash::from_content(b"contract body");

    let doc_id = store.create(id("alice"), hash.clone(), ids(&["bob", "carol"]));
    let doc = store.get(doc_id).unwrap();

    assert_eq!(doc.id, doc_id);
    assert_eq!(doc.creator, id("alice"));
    assert_eq!(doc.content_hash, hash);
    assert_eq!(doc.signers, ids(&["bob", "carol"]));
    assert!(doc.signatures.is_empty());
    assert!(!doc.is_completed);
}

#[test]
fn invariant_content_hash_is_not_validated() {
    let store = store();

    let empty = store.create(id("alice"), ContentHash::new(""), ids(&["bob"]));
    let odd = store.create(id("alice"), ContentHash::new("not a digest!"), ids(&["bob"]));

    assert_eq!(store.get(empty).unwrap().content_hash.as_str(), "");
    assert_eq!(store.get(odd).unwrap().content_hash.as_str(), "not a digest!");
}

#[test]
fn invariant_unauthorized_signer_rejected() {
    let store = store();
    let doc_id = store.create(id("alice"), ContentHash::new("h"), ids(&["bob"]));

    let err = store.sign(&id("mallory"), doc_id).unwrap_err();
    assert_eq!(
        err,
        StoreError::Unauthorized {
            document_id: doc_id,
            signer: id("mallory"),
        }
    );
    assert_eq!(err.kind(), StoreErrorKind::Unauthorized);

    // Creator is not implicitly a signer.
    let err = store.sign(&id("alice"), doc_id).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Unauthorized);

    let doc = store.get(doc_id).unwrap();
    assert!(doc.signatures.is_empty());
    assert!(!doc.is_completed);
}

#[test]
fn invariant_completion_after_all_signers() {
    let store = store();
    let doc_id = store.create(id("creator"), ContentHash::new("h"), ids(&["a", "b"]));

    store.sign(&id("a"), doc_id).unwrap();
    let doc = store.get(doc_id).unwrap();
    assert!(!doc.is_completed);
    assert_eq!(doc.signatures.len(), 1);
    assert_eq!(doc.signatures[0].signer, id("a"));

    store.sign(&id("b"), doc_id).unwrap();
    let doc = store.get(doc_id).unwrap();
    assert!(doc.is_completed);
    assert_eq!(doc.signatures.len(), 2);
    assert_eq!(doc.signatures[1].signer, id("b"));
}

#[test]
fn invariant_completed_document_is_terminal() {
    let store = store();
    let doc_id = store.create(id("creator"), ContentHash::new("h"), ids(&["a"]));
    store.sign(&id("a"), doc_id).unwrap();

    let before = store.get(doc_id).unwrap();
    assert!(before.is_completed);

    // Listed signer.
    assert_eq!(
        store.sign(&id("a"), doc_id),
        Err(StoreError::AlreadyCompleted(doc_id))
    );
    // Completion is checked before membership.
    assert_eq!(
        store.sign(&id("outsider"), doc_id),
        Err(StoreError::AlreadyCompleted(doc_id))
    );

    assert_eq!(store.get(doc_id).unwrap(), before);
}

#[test]
fn edge_zero_signers_never_completes() {
    let store = store();
    let doc_id = store.create(id("creator"), ContentHash::new("h"), Vec::new());

    let doc = store.get(doc_id).unwrap();
    assert!(!doc.is_completed);
    assert_eq!(doc.required_signatures(), 0);
    assert!(doc.pending_signers().is_empty());

    let err = store.sign(&id("creator"), doc_id).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Unauthorized);
    assert!(!store.get(doc_id).unwrap().is_completed);
}

#[test]
fn invariant_not_found() {
    let store = store();
    store.create(id("creator"), ContentHash::new("h"), ids(&["a"]));

    let missing = DocumentId::new(42);
    assert_eq!(store.get(missing), Err(StoreError::NotFound(missing)));
    assert_eq!(store.sign(&id("a"), missing), Err(StoreError::NotFound(missing)));
    assert_eq!(store.count(), 1);
}

#[test]
fn invariant_enumeration_in_id_order() {
    let store = store();
    for i in 0..5 {
        store.create(id("creator"), ContentHash::new(format!("h{i}")), ids(&["a"]));
    }

    let all = store.get_all();
    assert_eq!(all.len(), 5);
    assert_eq!(store.count(), 5);
    for (expected, doc) in all.iter().enumerate() {
        assert_eq!(doc.id.value(), expected as u64);
        assert_eq!(doc.content_hash.as_str(), format!("h{expected}"));
    }
}

#[test]
fn invariant_count_is_created_not_completed() {
    let store = store();
    let first = store.create(id("creator"), ContentHash::new("h"), ids(&["a"]));
    store.create(id("creator"), ContentHash::new("h"), ids(&["a"]));
    store.sign(&id("a"), first).unwrap();

    assert_eq!(store.count(), 2);
    assert_eq!(store.completed_count(), 1);
}

#[test]
fn invariant_reads_are_snapshots() {
    let store = store();
    let doc_id = store.create(id("creator"), ContentHash::new("h"), ids(&["a", "b"]));

    let mut copy = store.get(doc_id).unwrap();
    copy.is_completed = true;
    copy.signers.clear();
    copy.creator = id("someone else");

    let mut all = store.get_all();
    all[0].signers.push(id("intruder"));

    let fresh = store.get(doc_id).unwrap();
    assert!(!fresh.is_completed);
    assert_eq!(fresh.signers, ids(&["a", "b"]));
    assert_eq!(fresh.creator, id("creator"));

    // The stale copy does not see later mutations either.
    store.sign(&id("a"), doc_id).unwrap();
    assert!(copy.signatures.is_empty());
}

#[test]
fn get_all_matches_count_after_signing() {
    let store = store();
    for i in 0..3 {
        let doc_id = store.create(id("creator"), ContentHash::new(format!("h{i}")), ids(&["a"]));
        store.sign(&id("a"), doc_id).unwrap();
    }

    let all = store.get_all();
    assert_eq!(all.len() as u64, store.count());
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn get_many_skips_unknown_and_keeps_request_order() {
    let store = store();
    let a = store.create(id("creator"), ContentHash::new("a"), ids(&["x"]));
    let b = store.create(id("creator"), ContentHash::new("b"), ids(&["x"]));

    let docs = store.get_many(&[b, DocumentId::new(99), a]);
    let order: Vec<DocumentId> = docs.iter().map(|d| d.id).collect();
    assert_eq!(order, vec![b, a]);
}

#[test]
fn documents_by_creator_and_awaiting() {
    let store = store();
    let d0 = store.create(id("alice"), ContentHash::new("0"), ids(&["bob", "carol"]));
    let d1 = store.create(id("dave"), ContentHash::new("1"), ids(&["bob"]));
    let d2 = store.create(id("alice"), ContentHash::new("2"), ids(&["carol"]));

    let by_alice: Vec<DocumentId> = store
        .documents_by_creator(&id("alice"))
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(by_alice, vec![d0, d2]);

    let awaiting_bob: Vec<DocumentId> = store
        .documents_awaiting(&id("bob"))
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(awaiting_bob, vec![d0, d1]);

    store.sign(&id("bob"), d1).unwrap();
    store.sign(&id("bob"), d0).unwrap();
    assert!(store.documents_awaiting(&id("bob")).is_empty());

    let awaiting_carol: Vec<DocumentId> = store
        .documents_awaiting(&id("carol"))
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(awaiting_carol, vec![d0, d2]);
}
