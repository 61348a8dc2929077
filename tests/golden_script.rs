use std::fs;
use std::path::PathBuf;

fn golden_path(dir: &str, name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens");
    p.push(dir);
    p.push(name);
    p
}

#[test]
fn golden_script_matches_fixture() {
    let input = fs::read_to_string(golden_path("segments", "mixed_route.json")).expect("read fixture");
    let segments = routeline::segments_from_json(&input).expect("parse fixture");
    let script = routeline::compile(&segments).expect("compile");

    let expected_path = golden_path("expected", "mixed_route.js");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::write(&expected_path, format!("{}\n", script)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(script.as_str(), exp.trim_end_matches('\n'));
}

#[test]
fn golden_fingerprint_is_content_addressed() {
    let input = fs::read_to_string(golden_path("segments", "mixed_route.json")).expect("read fixture");
    let segments = routeline::segments_from_json(&input).expect("parse fixture");

    let a = routeline::compile(&segments).unwrap();
    let b = routeline::compile(&segments).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint().len(), 64);

    let mut changed = segments.clone();
    changed[2].color = "lime".to_string();
    let c = routeline::compile(&changed).unwrap();
    assert_ne!(a.fingerprint(), c.fingerprint());
}
