use crate::integration::support::{exists, Fixture, UUIDS};
use msi_tables::tooling::cli::CliContext;
use msi_tables::MsiError;

fn fixture(listing: &str, features: &str) -> Fixture {
    let fx = Fixture::new();
    fx.write("src/app/a.txt", "a");
    fx.write("src/app/b.txt", "b");
    fx.write("app.lst", listing);
    fx.write("features.txt", features);
    fx.write("uuids.txt", UUIDS);
    fx
}

#[test]
fn carriage_return_aborts_without_output() {
    let fx = fixture("app:\r\n\ta.txt\r\n", "F:\n\tapp\n");
    let err = CliContext::from_config(fx.config(&["app.lst"]))
        .execute()
        .unwrap_err();
    match err {
        MsiError::Format(msg) => assert!(msg.contains("non-Unix"), "{}", msg),
        other => panic!("unexpected {:?}", other),
    }
    assert!(!exists(&fx.path("out")));
}

#[test]
fn unresolved_feature_path_aborts_without_output() {
    let fx = fixture("app:\n\ta.txt\n", "F:\n\tapp/missing.txt\n");
    let err = CliContext::from_config(fx.config(&["app.lst"]))
        .execute()
        .unwrap_err();
    match err {
        MsiError::Resolution(msg) => assert!(msg.contains("app/missing.txt"), "{}", msg),
        other => panic!("unexpected {:?}", other),
    }
    assert!(!exists(&fx.path("out")));
}

#[test]
fn listed_file_missing_on_disk() {
    let fx = fixture("app:\n\ta.txt\n\tghost.txt\n", "F:\n\tapp\n");
    let err = CliContext::from_config(fx.config(&["app.lst"]))
        .execute()
        .unwrap_err();
    match err {
        MsiError::Resource(msg) => assert!(msg.contains("ghost.txt"), "{}", msg),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn exhausted_uuid_file() {
    let fx = fixture("app:\n\ta.txt\n", "F:\n\tapp\n");
    fx.write("uuids.txt", "\n");
    let err = CliContext::from_config(fx.config(&["app.lst"]))
        .execute()
        .unwrap_err();
    assert!(matches!(err, MsiError::Resource(_)));
}

#[test]
fn rename_mode_leaves_files_alone_on_failure() {
    let fx = fixture("app:\n\ta.txt\n\tb.txt\n", "F:\n\tnope/a.txt\n");
    let mut config = fx.config(&["app.lst"]);
    config.build.rename_files = true;
    assert!(CliContext::from_config(config).execute().is_err());
    assert!(exists(&fx.path("src/app/a.txt")));
    assert!(!exists(&fx.path("src/app/cablist.txt")));
}
