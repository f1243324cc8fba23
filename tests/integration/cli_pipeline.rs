use crate::integration::support::{rows, Fixture, UUIDS};
use msi_tables::tooling::cli::CliContext;

fn sample() -> Fixture {
    let fx = Fixture::new();
    fx.write("src/app/readme.txt", "hello");
    fx.write("src/app/license.txt", "mit");
    fx.write("src/app/bin/tool.exe", "abcdefgh");
    fx.write("app.lst", "app:\nreadme.txt\nlicense.txt\n\napp/bin:\ntool.exe\n");
    fx.write(
        "features.txt",
        "Main:\n\tapp/readme.txt\n\tTools:\n\t\tapp/bin\nLegal:\n\tapp/license.txt\n",
    );
    fx.write("uuids.txt", UUIDS);
    fx
}

#[test]
fn writes_all_tables() {
    let fx = sample();
    let mut config = fx.config(&["app.lst"]);
    config.build.id_prefix = "x".to_string();
    CliContext::from_config(config).execute().unwrap();

    assert_eq!(
        rows(&fx.read("out/Directory.idt")),
        vec![
            "TARGETDIR\t\tSourceDir",
            "ProgramFilesFolder\tTARGETDIR\t.",
            "APPDIR\tProgramFilesFolder\tapp|My App",
            "xd0\tAPPDIR\t.",
            "xd1\txd0\txd1|bin",
        ]
    );
    assert_eq!(
        rows(&fx.read("out/Component.idt")),
        vec![
            "xc0\t{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}\txd0\t2\t\txf0",
            "xc1\t{6BA7B811-9DAD-11D1-80B4-00C04FD430C8}\txd1\t2\t\txf2",
            "xc2\t{6BA7B812-9DAD-11D1-80B4-00C04FD430C8}\txd0\t2\t\txf1",
        ]
    );
    assert_eq!(
        rows(&fx.read("out/File.idt")),
        vec![
            "xf0\txc0\txf0|readme.txt\t5\t\t\t0\t1",
            "xf1\txc2\txf1|license.txt\t3\t\t\t0\t2",
            "xf2\txc1\txf2|tool.exe\t8\t\t\t0\t3",
        ]
    );
    assert_eq!(
        rows(&fx.read("out/Feature.idt")),
        vec![
            "xft0\t\tMain\tMain\t2\t3\tAPPDIR\t0",
            "xft1\txft0\tTools\tTools\t4\t3\tAPPDIR\t2",
            "xft2\t\tLegal\tLegal\t6\t3\tAPPDIR\t0",
        ]
    );
    assert_eq!(
        rows(&fx.read("out/FeatureComponents.idt")),
        vec!["xft0\txc0", "xft1\txc1", "xft2\txc2"]
    );
    assert_eq!(
        rows(&fx.read("out/Media.idt")),
        vec!["1\t3\t\t#xarchive.cab\t\t"]
    );
    assert!(fx.read("out/Directory.idt").starts_with(
        "Directory\tDirectory_Parent\tDefaultDir\ns72\tS72\tl255\nDirectory\tDirectory\n"
    ));
    assert!(!fx.path("out/renames.txt").exists());
    assert!(!fx.path("src/app/cablist.txt").exists());
}

#[test]
fn rename_mode_moves_files_after_writing() {
    let fx = sample();
    let mut config = fx.config(&["app.lst"]);
    config.build.rename_files = true;
    CliContext::from_config(config).execute().unwrap();

    assert_eq!(fx.read("src/app/cablist.txt"), "f0\nf1\nf2\n");
    assert_eq!(fx.read("src/app/f0"), "hello");
    assert_eq!(fx.read("src/app/f2"), "abcdefgh");
    assert!(!fx.path("src/app/readme.txt").exists());
    assert!(!fx.path("src/app/bin/tool.exe").exists());

    let manifest = fx.read("out/renames.txt");
    assert_eq!(manifest.lines().count(), 3);
    assert!(manifest.lines().next().unwrap().ends_with("f0"));
}

#[test]
fn json_summary_reports_counts() {
    let fx = sample();
    let output = CliContext::from_config(fx.config(&["app.lst"]))
        .with_format("json")
        .execute()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["program_dir"], "APPDIR");
    let tables = parsed["tables"].as_array().unwrap();
    let files = tables
        .iter()
        .find(|t| t["table"] == "File")
        .expect("File table should be reported");
    assert_eq!(files["rows"], 3);
    assert_eq!(parsed["roots"][0]["name"], "app");
    assert_eq!(parsed["written"].as_array().unwrap().len(), 6);
}

#[test]
fn text_summary_lists_tables() {
    let fx = sample();
    let output = CliContext::from_config(fx.config(&["app.lst"]))
        .execute()
        .unwrap();
    assert!(output.contains("FeatureComponents"));
    assert!(output.contains("APPDIR"));
}

#[test]
fn generated_uuids_need_no_uuid_file() {
    let fx = sample();
    std::fs::remove_file(fx.path("uuids.txt")).unwrap();
    let mut config = fx.config(&["app.lst"]);
    config.build.generate_uuids = true;
    CliContext::from_config(config).execute().unwrap();

    for row in rows(&fx.read("out/Component.idt")) {
        let uuid = row.split('\t').nth(1).unwrap();
        assert!(uuid.starts_with('{') && uuid.ends_with('}'), "{}", uuid);
        assert_eq!(uuid.len(), 38);
    }
}

#[test]
fn config_file_supplies_settings() {
    let fx = sample();
    let base = fx.config(&["app.lst"]);
    let toml = format!(
        "[build]\nprogram_dir = \"tool|Tool Suite\"\nid_prefix = \"t\"\nsource_root = {:?}\noutput_dir = {:?}\nfeatures_file = {:?}\nuuids_file = {:?}\nlistings = [{:?}]\n",
        base.build.source_root.display().to_string(),
        base.build.output_dir.display().to_string(),
        base.build.features_file.display().to_string(),
        base.build.uuids_file.display().to_string(),
        base.build.listings[0].display().to_string(),
    );
    let config_path = fx.write("msi-tables.toml", &toml);

    let context = CliContext::new(fx.temp.path(), Some(config_path.as_path())).unwrap();
    assert_eq!(context.config().build.id_prefix, "t");
    context.execute().unwrap();

    assert!(rows(&fx.read("out/Directory.idt"))
        .contains(&"TOOLDIR\tProgramFilesFolder\ttool|Tool Suite".to_string()));
    assert_eq!(rows(&fx.read("out/Media.idt")), vec!["1\t3\t\t#tarchive.cab\t\t"]);
}
