#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A cookbook with a `web` recipe made of two groups.
pub fn cookbook() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(
        root,
        "recipes/web.json",
        r#"{"recipe": {"base": ["lang.ks", "network.ks"], "post": ["motd.ks"]}}"#,
    );
    write(root, "templates/base/lang.ks", "lang {{ system.lang }}");
    write(root, "templates/base/network.ks", "network --hostname={{ network.hostname }}\n");
    write(root, "templates/post/motd.ks", "%post\necho {{ motd }} > /etc/motd\n%end");

    temp_dir
}
