use crate::integration::support::{rows, Fixture, UUIDS};
use msi_tables::tooling::cli::CliContext;

#[test]
fn named_root_shares_matching_directories() {
    let fx = Fixture::new();
    fx.write("src/app/a.txt", "a");
    fx.write("src/app/lib/core.dll", "core");
    fx.write("src/extra/b.txt", "bb");
    fx.write("src/extra/lib/plugin.dll", "plugin");
    fx.write("src/extra/docs/guide.txt", "guide");
    fx.write("app.lst", "app:\n\ta.txt\n\napp/lib:\n\tcore.dll\n");
    fx.write(
        "extra.lst",
        "extra:\n\tb.txt\n\nextra/lib:\n\tplugin.dll\n\nextra/docs:\n\tguide.txt\n",
    );
    fx.write(
        "features.txt",
        "Core:\n\tapp\nPlugins:\n\textra/lib/plugin.dll\nDocs:\n\textra/docs\n",
    );
    fx.write("uuids.txt", UUIDS);

    CliContext::from_config(fx.config(&["app.lst", "extra.lst"]))
        .execute()
        .unwrap();

    // `lib` is shared; only `docs` is new under the primary directory.
    assert_eq!(
        rows(&fx.read("out/Directory.idt"))[3..],
        [
            "d0\tAPPDIR\t.".to_string(),
            "d1\td0\td1|lib".to_string(),
            "d2\td0\td2|docs".to_string(),
        ]
    );
    assert_eq!(
        rows(&fx.read("out/File.idt"))
            .iter()
            .map(|row| row.split('\t').take(2).collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>(),
        vec!["f0 c0", "f1 c1", "f2 c2", "f3 c1", "f4 c3"]
    );
    assert_eq!(
        rows(&fx.read("out/FeatureComponents.idt")),
        vec!["ft0\tc0", "ft0\tc1", "ft1\tc1", "ft2\tc3"]
    );
}

#[test]
fn shared_directory_splits_between_roots() {
    let fx = Fixture::new();
    fx.write("src/app/lib/core.dll", "core");
    fx.write("src/extra/lib/plugin.dll", "plugin");
    fx.write("app.lst", "app/lib:\n\tcore.dll\n");
    fx.write("extra.lst", "extra/lib:\n\tplugin.dll\n");
    fx.write(
        "features.txt",
        "Core:\n\tapp/lib/core.dll\nPlugins:\n\textra/lib/plugin.dll\n",
    );
    let mut config = fx.config(&["app.lst", "extra.lst"]);
    config.build.generate_uuids = true;
    CliContext::from_config(config).execute().unwrap();

    let components = rows(&fx.read("out/Component.idt"));
    assert_eq!(components.len(), 2);
    assert!(components[1].starts_with("c1\t"));
    assert!(components[1].ends_with("\td1\t2\t\tf1"));
    assert_eq!(
        rows(&fx.read("out/FeatureComponents.idt")),
        vec!["ft0\tc0", "ft1\tc1"]
    );
}
