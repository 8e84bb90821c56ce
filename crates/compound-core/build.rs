const SECTIONS: &[&str] = &["split", "analyzer", "output"];

fn main() {
    println!("cargo:rerun-if-changed=src/default_settings.toml");
    let path = "src/default_settings.toml";
    let table = match include_str!("src/default_settings.toml").parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("{path} contains invalid TOML: {e}"),
    };
    for section in SECTIONS {
        if !table.get(*section).is_some_and(toml::Value::is_table) {
            panic!("{path} is missing the [{section}] table");
        }
    }
}
