use std::cell::Cell;
use std::fs;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;
use serde_json::{Value, json};

use visage_assets::app::App;
use visage_assets::config::{GenomeJob, PathwayJob};
use visage_assets::domain::UcscCatalog;
use visage_assets::error::AssetError;
use visage_assets::ucsc::UcscClient;
use visage_assets::wikipathways::PathwayClient;

struct MockUcsc {
    catalog: Value,
    calls: Cell<usize>,
}

impl MockUcsc {
    fn new(catalog: Value) -> Self {
        Self {
            catalog,
            calls: Cell::new(0),
        }
    }
}

impl UcscClient for &MockUcsc {
    fn list_genomes(&self) -> Result<UcscCatalog, AssetError> {
        self.calls.set(self.calls.get() + 1);
        UcscCatalog::from_value(self.catalog.clone())
    }
}

struct FailingUcsc;

impl UcscClient for FailingUcsc {
    fn list_genomes(&self) -> Result<UcscCatalog, AssetError> {
        Err(AssetError::CatalogStatus {
            catalog: "UCSC",
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

struct MockPathways(Value);

impl PathwayClient for MockPathways {
    fn pathway_info(&self) -> Result<Value, AssetError> {
        Ok(self.0.clone())
    }
}

struct UnusedPathways;

impl PathwayClient for UnusedPathways {
    fn pathway_info(&self) -> Result<Value, AssetError> {
        Err(AssetError::CatalogHttp {
            catalog: "WikiPathways",
            message: "not used".to_string(),
        })
    }
}

fn genome_job(root: &std::path::Path) -> GenomeJob {
    let root = Utf8PathBuf::from_path_buf(root.to_path_buf()).unwrap();
    let browser = root.join("igv.json");
    let species = root.join("eva.json");
    fs::write(
        browser.as_std_path(),
        serde_json::to_vec(&json!([
            {"id": "hg38", "tracks": [{"format": "refgene", "url": "refGene.txt.gz"}], "name": "Human"},
            {"id": "mm10", "tracks": [{"format": "bed"}], "name": "Mouse"}
        ]))
        .unwrap(),
    )
    .unwrap();
    fs::write(
        species.as_std_path(),
        serde_json::to_vec(&json!({
            "hg38": {"evaSpecies": "Homo sapiens", "trackHubId": "42", "extra": true},
            "mm10": {"evaSpecies": "Mus musculus"}
        }))
        .unwrap(),
    )
    .unwrap();

    GenomeJob {
        browser_genomes: browser,
        species_metadata: species,
        output: root.join("genomes.ts"),
        ..GenomeJob::default()
    }
}

fn ucsc_catalog() -> Value {
    json!({
        "hg38": {"organism": "Human", "description": "Dec. 2013 (GRCh38/hg38)"},
        "mm10": {"organism": "Mouse"}
    })
}

fn parse_constant(content: &str, name: &str) -> Value {
    let prefix = format!("export const {name} = ");
    let literal = content.strip_prefix(&prefix).unwrap();
    serde_json::from_str(literal).unwrap()
}

#[test]
fn genome_run_merges_all_three_sources() {
    let temp = tempfile::tempdir().unwrap();
    let job = genome_job(temp.path());
    let ucsc = MockUcsc::new(ucsc_catalog());
    let app = App::new(&ucsc, UnusedPathways);

    let result = app.run_genomes(&job).unwrap();
    assert_eq!(result.report.qualified, 1);
    assert_eq!(result.report.no_reference_track, 1);

    let content = fs::read_to_string(job.output.as_std_path()).unwrap();
    let genomes = parse_constant(&content, "genomes");
    assert_eq!(
        genomes,
        json!([{
            "id": "hg38",
            "tracks": [{"format": "refgene", "url": "refGene.txt.gz"}],
            "name": "Human",
            "organism": "Human",
            "description": "Dec. 2013 (GRCh38/hg38)",
            "evaSpecies": "Homo sapiens",
            "trackHubId": "42"
        }])
    );
    assert!(content.contains("\n    {\n        \"id\": \"hg38\""));
}

#[test]
fn genome_run_is_byte_identical_across_runs() {
    let temp = tempfile::tempdir().unwrap();
    let job = genome_job(temp.path());
    let ucsc = MockUcsc::new(ucsc_catalog());
    let app = App::new(&ucsc, UnusedPathways);

    app.run_genomes(&job).unwrap();
    let first = fs::read(job.output.as_std_path()).unwrap();
    app.run_genomes(&job).unwrap();
    let second = fs::read(job.output.as_std_path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(ucsc.calls.get(), 2);
}

#[test]
fn fetch_failure_leaves_previous_output_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let job = genome_job(temp.path());
    fs::write(job.output.as_std_path(), "previous").unwrap();

    let app = App::new(FailingUcsc, UnusedPathways);
    let err = app.run_genomes(&job).unwrap_err();
    assert_matches!(err, AssetError::CatalogStatus { status: 503, .. });
    assert_eq!(
        fs::read_to_string(job.output.as_std_path()).unwrap(),
        "previous"
    );
}

#[test]
fn malformed_listing_aborts_without_output() {
    let temp = tempfile::tempdir().unwrap();
    let job = genome_job(temp.path());
    fs::write(job.browser_genomes.as_std_path(), "[{\"id\": ").unwrap();

    let ucsc = MockUcsc::new(ucsc_catalog());
    let app = App::new(&ucsc, UnusedPathways);
    let err = app.run_genomes(&job).unwrap_err();
    assert_matches!(err, AssetError::InputParse { .. });
    assert!(!job.output.as_std_path().exists());
}

#[test]
fn pathway_run_writes_catalog_unchanged() {
    let temp = tempfile::tempdir().unwrap();
    let output = Utf8PathBuf::from_path_buf(temp.path().join("pathways.ts")).unwrap();
    let catalog = json!([
        {"id": "WP554", "url": "https://www.wikipathways.org/pathways/WP554", "species": "Homo sapiens", "revision": "134059"},
        {"id": "WP1", "name": "Statin pathway", "species": "Mus musculus"}
    ]);
    let job = PathwayJob {
        output: output.clone(),
        ..PathwayJob::default()
    };

    let ucsc = MockUcsc::new(json!({}));
    let app = App::new(&ucsc, MockPathways(catalog.clone()));
    let result = app.run_pathways(&job).unwrap();
    assert_eq!(ucsc.calls.get(), 0);
    assert_eq!(result.entries, 2);

    let content = fs::read_to_string(output.as_std_path()).unwrap();
    assert_eq!(parse_constant(&content, "pathways"), catalog);
    assert!(content.find("\"url\"").unwrap() < content.find("\"species\"").unwrap());
}

#[test]
fn listing_entries_unknown_to_ucsc_do_not_abort_the_run() {
    let temp = tempfile::tempdir().unwrap();
    let job = genome_job(temp.path());
    fs::write(
        job.browser_genomes.as_std_path(),
        serde_json::to_vec(&json!([
            {"id": "hg38", "tracks": [{"format": "refgene"}]},
            {"id": "chm13v2"},
            {"id": "", "tracks": []}
        ]))
        .unwrap(),
    )
    .unwrap();

    let ucsc = MockUcsc::new(ucsc_catalog());
    let app = App::new(&ucsc, UnusedPathways);
    let result = app.run_genomes(&job).unwrap();
    assert_eq!(result.report.qualified, 1);
    assert_eq!(result.report.missing_from_ucsc, 2);

    let content = fs::read_to_string(job.output.as_std_path()).unwrap();
    let genomes = parse_constant(&content, "genomes");
    assert_eq!(genomes.as_array().unwrap().len(), 1);
    assert_eq!(genomes[0]["id"], json!("hg38"));
}
