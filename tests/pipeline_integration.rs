// End-to-end runs against a temporary directory and an in-memory catalog

use pretty_assertions::assert_eq;
use sales_analytics::*;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region";

fn write_input(config: &PipelineConfig, lines: &[&str]) {
    fs::create_dir_all(config.input.parent().unwrap()).unwrap();
    let mut content = String::from(HEADER);
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    content.push('\n');
    fs::write(&config.input, content).unwrap();
}

fn catalog() -> StaticCatalog {
    StaticCatalog::new(vec![
        ProductRecord {
            id: Some(1),
            title: Some("Widget".to_string()),
            category: Some("gadgets".to_string()),
            brand: Some("Acme".to_string()),
            rating: Some(4.2),
        },
        ProductRecord {
            id: None,
            title: Some("Orphan".to_string()),
            ..Default::default()
        },
    ])
}

#[test]
fn test_single_line_scenario() {
    let lines = read_and_parse(&["T1|2024-01-01|P1|Widget|2|10.00|C1|West"]);
    let outcome = validate_and_filter(&lines, &FilterCriteria::none());

    assert_eq!(outcome.transactions.len(), 1);
    assert_eq!(outcome.transactions[0].amount(), 20.0);

    let analytics = AnalyticsEngine::new().analyze(&outcome.transactions);
    assert_eq!(analytics.regions[0].region, "West");
    assert_eq!(analytics.regions[0].percentage, 100.0);
    assert_eq!(analytics.top_products[0].product_name, "Widget");
    assert_eq!(analytics.top_products[0].quantity, 2);
}

fn read_and_parse(lines: &[&str]) -> Vec<Transaction> {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    write_input(&config, lines);
    parse_transactions(&read_sales_data(&config.input).unwrap())
}

#[test]
fn test_short_line_does_not_affect_others() {
    let parsed = read_and_parse(&[
        "T1|2024-01-01|P1|Widget|2|10.00|C1|West",
        "T2|2024-01-01|P1|Widget|2|10.00|C1",
        "T3|2024-01-02|P2|Gizmo|1|5.00|C2|East",
    ]);

    let ids: Vec<&str> = parsed.iter().map(|t| t.transaction_id.as_str()).collect();
    assert_eq!(ids, vec!["T1", "T3"]);

    let summary = validate_and_filter(&parsed, &FilterCriteria::none()).summary;
    assert_eq!(summary.total_input, 2);
    assert_eq!(summary.invalid, 0);
}

#[test]
fn test_empty_catalog_means_no_matches() {
    let parsed = read_and_parse(&[
        "T1|2024-01-01|P1|Widget|2|10.00|C1|West",
        "T2|2024-01-01|P2|Gizmo|1|5.00|C2|East",
    ]);

    let mapping = create_product_mapping(&fetch_all_products(&StaticCatalog::empty()));
    let enriched = enrich_sales_data(&parsed, &mapping);

    assert_eq!(enriched.len(), 2);
    assert!(enriched.iter().all(|e| !e.api_match && e.api_category.is_none()));
}

#[test]
fn test_same_day_two_customers() {
    let parsed = read_and_parse(&[
        "T1|2024-01-01|P1|Widget|2|10.00|C1|West",
        "T2|2024-01-01|P2|Gizmo|1|5.00|C2|East",
    ]);

    let daily = daily_sales_trend(&parsed);

    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].unique_customers, 2);
    assert_eq!(daily[0].transaction_count, 2);
}

#[test]
fn test_full_pipeline_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    write_input(
        &config,
        &[
            "T1|2024-01-01|P1|Widget|2|1,000.00|C1|West",
            "T2|2024-01-02|P2|Gizmo, Deluxe|1|5.00|C2|East",
            "T3|2024-01-02|P1|Widget|0|10.00|C3|West",
        ],
    );

    let outcome = run(&config, &catalog(), FilterMode::Fixed(FilterCriteria::none())).unwrap();

    assert_eq!(outcome.summary.final_count, 2);
    assert_eq!(outcome.summary.invalid, 1);
    assert_eq!(outcome.enrichment.matched, 1);
    assert_eq!(outcome.exit_code(), 0);

    let clean = fs::read_to_string(&config.clean_data).unwrap();
    assert_eq!(
        clean.lines().collect::<Vec<_>>(),
        vec![
            "TransactionID,Date,ProductID,ProductName,Quantity,UnitPrice,CustomerID,Region",
            "T1,2024-01-01,P1,Widget,2,1000.0,C1,West",
            "T2,2024-01-02,P2,Gizmo  Deluxe,1,5.0,C2,East",
        ]
    );

    let enriched = fs::read_to_string(&config.enriched).unwrap();
    assert_eq!(
        enriched.lines().nth(1),
        Some("T1|2024-01-01|P1|Widget|2|1000.0|C1|West|gadgets|Acme|4.2|True")
    );
    assert_eq!(
        enriched.lines().nth(2),
        Some("T2|2024-01-02|P2|Gizmo  Deluxe|1|5.0|C2|East|None|None|None|False")
    );

    let report = fs::read_to_string(&config.report).unwrap();
    assert!(report.contains("Total Revenue:       $2,005.00"));
    assert!(report.contains("Date Range:          2024-01-01 to 2024-01-02"));
    assert!(report.contains("Missing Products (Sample): Gizmo  Deluxe"));
}

#[test]
fn test_enriched_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    write_input(
        &config,
        &[
            "T1|2024-01-01|P1|Widget|2|10.00|C1|West",
            "T2|2024-01-02|P7|Sprocket|3|2.25|C2|North",
        ],
    );

    run(&config, &catalog(), FilterMode::Fixed(FilterCriteria::none())).unwrap();

    let parsed = parse_transactions(&read_sales_data(&config.input).unwrap());
    let mapping = create_product_mapping(&catalog().fetch_products().unwrap());
    let expected = enrich_sales_data(&parsed, &mapping);

    assert_eq!(load_enriched_data(&config.enriched).unwrap(), expected);
}

#[test]
fn test_region_filter_run() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    write_input(
        &config,
        &[
            "T1|2024-01-01|P1|Widget|2|10.00|C1|West",
            "T2|2024-01-02|P2|Gizmo|1|5.00|C2|East",
        ],
    );

    let criteria = FilterCriteria::none().with_region("West");
    let outcome = run(&config, &catalog(), FilterMode::Fixed(criteria)).unwrap();

    assert_eq!(outcome.summary.filtered_by_region, 1);
    assert_eq!(outcome.analytics.total_revenue, 20.0);
}
