mod common;

use crispin::config::{Config, MenuSettings, ServerConfig};
use crispin::cookbook::Cookbook;
use crispin::menu::{fallback_script, BootMenu};
use tempfile::TempDir;

fn server() -> ServerConfig {
    ServerConfig { hostname: "pxe.lan".to_string(), ..Default::default() }
}

fn answer(source: &str) -> String {
    format!(r#"{{"recipe": "web", "metadata": {{"source": "{source}"}}}}"#)
}

#[test_log::test]
fn test_menu_skips_bad_entries() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers");
    common::write(&answers, "c-remote.json", &answer("http://mirror.example/repo/"));
    common::write(&answers, "a-iso.json", &answer("http://mirror.example/rocky.iso"));
    common::write(&answers, "b-broken.json", "{ this is not json");
    common::write(&answers, "d-nosource.json", r#"{"recipe": "web"}"#);
    common::write(&answers, "e-remote.yaml", "metadata:\n  source: https://mirror.example/alma/\n");
    common::write(&answers, "notes.txt", "ignored");

    let menu = BootMenu::scan(&answers, &server(), &MenuSettings::default());

    let names: Vec<&str> = menu.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["c-remote"]);
    assert_eq!(menu.default_entry().unwrap().name, "c-remote");
}

#[test]
fn test_menu_script() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers");
    common::write(&answers, "web01.json", &answer("http://mirror.example/repo/"));
    common::write(&answers, "db01.json", &answer("http://mirror.example/repo/"));

    let script = BootMenu::scan(&answers, &server(), &MenuSettings::default()).render();

    assert!(script.starts_with("#!ipxe\n\nmenu Crispin iPXE Boot Menu\n\n"));
    assert!(script.contains("item db01 db01\nitem web01 web01\n"));
    assert!(script.contains("choose --default db01 --timeout 5000 target && goto ${target}\n"));
    assert!(script.contains(
        ":web01\nkernel http://mirror.example/repo/images/pxeboot/vmlinuz \
         inst.repo=http://mirror.example/repo/ inst.ks=http://pxe.lan:9000/crispin/get/web01 quiet\n\
         initrd http://mirror.example/repo/images/pxeboot/initrd.img\nboot\n"
    ));
}

#[test]
fn test_menu_local_tree() {
    let dir = TempDir::new().unwrap();
    let tree = dir.path().join("trees/rocky9");
    std::fs::create_dir_all(&tree).unwrap();
    let locator = format!("{}/", tree.display());
    let answers = dir.path().join("answers");
    common::write(&answers, "local.json", &answer(&locator));

    let menu = BootMenu::scan(&answers, &server(), &MenuSettings::default());

    assert_eq!(menu.entries.len(), 1);
    let stanza = menu.entries[0].stanza();
    let served = format!("http://pxe.lan:9000{}", tree.display());
    assert!(stanza.contains(&format!("kernel {served}/images/pxeboot/vmlinuz")));
    assert!(stanza.contains(&format!("inst.stage2={served}/images/install.img")));
    assert!(stanza.contains(&format!("initrd {served}/images/pxeboot/initrd.img")));
}

#[test]
fn test_menu_fallback() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers");

    let menu = BootMenu::scan(&answers, &server(), &MenuSettings::default());
    assert!(menu.entries.is_empty());
    assert_eq!(menu.render(), fallback_script());

    common::write(&answers, "only.json", &answer("/srv/rhel9.iso"));
    let menu = BootMenu::scan(&answers, &server(), &MenuSettings::default());
    assert_eq!(menu.render(), fallback_script());
}

#[test]
fn test_cookbook_menu_uses_config() {
    let dir = TempDir::new().unwrap();
    common::write(dir.path(), "answers/web01.json", &answer("http://mirror.example/repo/"));
    let mut config = Config::default();
    config.server = ServerConfig { hostname: "10.0.0.5".to_string(), port: 8080, ..Default::default() };
    config.menu.timeout_ms = 100;

    let script = Cookbook::new(dir.path(), config).boot_menu().render();

    assert!(script.contains("--timeout 100 "));
    assert!(script.contains("inst.ks=http://10.0.0.5:8080/crispin/get/web01"));
}

#[test]
fn test_menu_entries_are_retrievable() {
    let dir = common::cookbook();
    let stored = |lang: &str| {
        format!(
            r#"{{"recipe": "web", "metadata": {{"source": "http://mirror.example/repo/"}},
                "system": {{"lang": "{lang}"}}, "network": {{"hostname": "h"}}, "motd": "m"}}"#
        )
    };
    common::write(dir.path(), "answers/dup.json", &stored("C"));
    common::write(dir.path(), "answers/dup.yml", "metadata:\n  source: http://mirror.example/other/\n");
    common::write(dir.path(), "answers/web02.yaml", "metadata:\n  source: http://mirror.example/repo/\n");
    let cookbook = Cookbook::new(dir.path(), Config::default());

    let menu = cookbook.boot_menu();

    let names: Vec<&str> = menu.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["dup"]);
    for entry in &menu.entries {
        let route = entry.callback.strip_prefix("http://localhost:9000").unwrap();
        let response = cookbook.handle_get(route);
        assert_eq!(response.status, 200, "{}", response.body);
    }
}
