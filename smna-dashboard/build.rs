use std::env;
use std::fs;
use std::path::Path;

/// Header rows of an empty two-level table, used when no fixture is present.
const EMPTY_TABLE: &str = ",df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc\n,Date,Observation Type,Iter,Nobs,Jo,Jo/n\n";

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("jo_table_series.csv");

    // Copy jo_table_series.csv to OUT_DIR for include_str, checking that
    // both header rows are there so a truncated export fails the build
    // rather than the page.
    let table_src = Path::new("../fixtures/jo_table_series.csv");
    if table_src.exists() {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(table_src)
            .expect("Failed to open jo_table_series.csv");
        let header_rows = rdr.records().take(2).flatten().count();
        assert_eq!(
            header_rows, 2,
            "jo_table_series.csv needs an experiment row and a column row"
        );
        fs::copy(table_src, &dest).unwrap();
    } else {
        fs::write(&dest, EMPTY_TABLE).unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/jo_table_series.csv");
}
