use camino::Utf8Path;
use ephem_traj::trajectories::catalog_reader::read_catalog_file;

#[test]
fn test_read_sbdb_export() {
    let designators = read_catalog_file(Utf8Path::new("tests/data/sbdb.csv")).unwrap();
    assert_eq!(designators, vec!["20000433", "20001036", "54481740"]);
}
