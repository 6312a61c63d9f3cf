//! Unit tests for attachment staging against each blob store.

use std::collections::HashSet;
use std::sync::Arc;

use camino::Utf8PathBuf;
use mockall::{Sequence, mock};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::attachment::{
    adapters::{directory::CapStdBlobStore, memory::InMemoryBlobStore},
    domain::UploadedFile,
    ports::{BlobStore, BlobStoreError, BlobStoreResult},
    services::{AttachmentError, AttachmentStore},
};
use crate::error::ErrorKind;

mock! {
    pub Blobs {}
    impl BlobStore for Blobs {
        fn create_new(&self, name: &str, payload: &[u8]) -> BlobStoreResult<String>;
        fn read(&self, name: &str) -> BlobStoreResult<Vec<u8>>;
    }
}

#[fixture]
fn memory() -> (AttachmentStore<InMemoryBlobStore>, InMemoryBlobStore) {
    let blobs = InMemoryBlobStore::new();
    (AttachmentStore::new(Arc::new(blobs.clone())), blobs)
}

struct DirectoryFixture {
    store: AttachmentStore<CapStdBlobStore>,
    root: Utf8PathBuf,
    _temp: TempDir,
}

#[fixture]
fn directory() -> DirectoryFixture {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().join("uploads")).expect("utf-8 temp path");
    let blobs = CapStdBlobStore::open(&root).expect("open upload dir");
    DirectoryFixture {
        store: AttachmentStore::new(Arc::new(blobs)),
        root,
        _temp: temp,
    }
}

fn photo(bytes: &[u8]) -> UploadedFile {
    UploadedFile::new("photo.jpg", bytes).with_mime_type("image/jpeg")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_name_uploads_get_suffixes_and_stay_readable(directory: DirectoryFixture) {
    let first = directory
        .store
        .stage(vec![photo(b"first")])
        .await
        .expect("first upload");
    let second = directory
        .store
        .stage(vec![photo(b"second")])
        .await
        .expect("second upload");

    let names: Vec<&str> = first
        .iter()
        .chain(second.iter())
        .map(|f| f.filename.as_str())
        .collect();
    assert_eq!(names, vec!["photo.jpg", "photo_1.jpg"]);

    let original = directory.store.open("photo.jpg").await.expect("read first");
    let suffixed = directory
        .store
        .open("photo_1.jpg")
        .await
        .expect("read second");
    assert_eq!(original, b"first");
    assert_eq!(suffixed, b"second");

    let stored = second.first().expect("one file");
    assert_eq!(stored.mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(
        stored.storage_path,
        directory.root.join("photo_1.jpg").into_string()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn existing_file_on_disk_is_never_overwritten(directory: DirectoryFixture) {
    std::fs::write(directory.root.join("photo.jpg"), b"already here").expect("seed file");

    let stored = directory
        .store
        .stage(vec![photo(b"new")])
        .await
        .expect("upload");

    assert_eq!(
        stored.first().map(|f| f.filename.as_str()),
        Some("photo_1.jpg")
    );
    let untouched = std::fs::read(directory.root.join("photo.jpg")).expect("read original");
    assert_eq!(untouched, b"already here");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn files_in_one_batch_are_deduplicated_independently(
    memory: (AttachmentStore<InMemoryBlobStore>, InMemoryBlobStore),
) {
    let (store, _blobs) = memory;
    let stored = store
        .stage(vec![
            photo(b"a"),
            photo(b"b"),
            UploadedFile::new("notes.txt", "c"),
            photo(b"d"),
        ])
        .await
        .expect("batch");

    let names: Vec<&str> = stored.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(
        names,
        vec!["photo.jpg", "photo_1.jpg", "notes.txt", "photo_2.jpg"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn digest_is_sha256_of_payload(
    memory: (AttachmentStore<InMemoryBlobStore>, InMemoryBlobStore),
) {
    let (store, _blobs) = memory;
    let stored = store
        .stage(vec![UploadedFile::new("abc.txt", "abc")])
        .await
        .expect("upload");
    assert_eq!(
        stored.first().map(|f| f.content_digest.as_str()),
        Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_name_rejects_whole_batch_before_writing(
    memory: (AttachmentStore<InMemoryBlobStore>, InMemoryBlobStore),
) {
    let (store, blobs) = memory;
    let err = store
        .stage(vec![photo(b"ok"), UploadedFile::new("../", "bad")])
        .await
        .expect_err("unusable name");

    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert!(blobs.is_empty().expect("lock"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_rejects_path_like_names(
    memory: (AttachmentStore<InMemoryBlobStore>, InMemoryBlobStore),
) {
    let (store, _blobs) = memory;
    let err = store.open("../photo.jpg").await.expect_err("path name");
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_missing_file_is_not_found(directory: DirectoryFixture) {
    let err = directory
        .store
        .open("missing.jpg")
        .await
        .expect_err("nothing stored");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exhausted_names_are_a_storage_conflict() {
    let mut blobs = MockBlobs::new();
    let mut sequence = Sequence::new();
    for expected in ["photo.jpg", "photo_1.jpg", "photo_2.jpg"] {
        blobs
            .expect_create_new()
            .withf(move |name, _| name == expected)
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Err(BlobStoreError::AlreadyExists));
    }
    let store = AttachmentStore::new(Arc::new(blobs)).with_max_attempts(3);

    let err = store
        .stage(vec![photo(b"x")])
        .await
        .expect_err("every name taken");

    assert!(matches!(
        err,
        AttachmentError::NamesExhausted { attempts: 3, .. }
    ));
    assert_eq!(err.kind(), ErrorKind::StorageConflict);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_is_not_retried_under_another_name() {
    let mut blobs = MockBlobs::new();
    blobs.expect_create_new().times(1).returning(|_, _| {
        Err(BlobStoreError::from(std::io::Error::other("disk full")))
    });
    let store = AttachmentStore::new(Arc::new(blobs));

    let err = store
        .stage(vec![photo(b"x")])
        .await
        .expect_err("disk full");
    assert_eq!(err.kind(), ErrorKind::Infrastructure);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_same_name_uploads_never_share_a_file(directory: DirectoryFixture) {
    const UPLOADS: usize = 32;

    let tasks: Vec<_> = (0..UPLOADS)
        .map(|index| {
            let store = directory.store.clone();
            tokio::spawn(async move {
                let payload = format!("payload {index}");
                let stored = store
                    .stage(vec![photo(payload.as_bytes())])
                    .await
                    .expect("stage");
                (stored.into_iter().next().expect("one file"), payload)
            })
        })
        .collect();

    let mut names = HashSet::new();
    for task in tasks {
        let (file, payload) = task.await.expect("join");
        assert!(names.insert(file.filename.clone()), "{} reused", file.filename);
        let read = directory.store.open(&file.filename).await.expect("read");
        assert_eq!(read, payload.as_bytes());
    }
    assert_eq!(names.len(), UPLOADS);
    assert!(names.contains("photo.jpg"));
}
