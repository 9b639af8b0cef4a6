use survey_cli::commands::LoadReport;
use survey_ingest::DatasetLoadAttempt;
use survey_model::Schema;

/// Maximum number of data errors printed before eliding the rest.
const MAX_PRINTED_ERRORS: usize = 50;

pub fn print_load_summary(report: &LoadReport) {
    println!("File:   {}", report.csv_path.display());
    println!("SHA256: {}", report.sha256);
    println!("Mode:   {}", report.options.mode);

    match &report.attempt {
        DatasetLoadAttempt::Failed { error } => {
            println!("Status: failed");
            println!("Error:  {error}");
        }
        DatasetLoadAttempt::Succeeded {
            dataset,
            header,
            data_errors,
        } => {
            if !header.org_col_found() {
                println!(
                    "Org node column '{}' not found",
                    dataset.schema.org_node_col()
                );
            }
            if !header.missing_columns.is_empty() {
                println!("Missing columns: {}", header.missing_columns.join(", "));
            }
            if !header.extra_columns.is_empty() {
                println!("Extra columns:   {}", quoted(&header.extra_columns));
            }
            if !header.duplicate_columns.is_empty() {
                println!("Ignored duplicates: {}", quoted(&header.duplicate_columns));
            }
            println!("Rows loaded: {}", dataset.row_count());
            println!("Org nodes:   {}", dataset.org_nodes.len());

            if data_errors.is_empty() {
                println!("Status: ok");
            } else {
                println!("Status: loaded with {} data error(s)", data_errors.len());
                for error in data_errors.iter().take(MAX_PRINTED_ERRORS) {
                    println!("  {error}");
                }
                if data_errors.len() > MAX_PRINTED_ERRORS {
                    println!("  ... {} more", data_errors.len() - MAX_PRINTED_ERRORS);
                }
            }
        }
    }
}

fn quoted(codes: &[String]) -> String {
    codes
        .iter()
        .map(|code| format!("'{code}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_schema(schema: &Schema) {
    println!("Org node column: {}", schema.org_node_col());
    println!(
        "Columns: {} ({} questions, {} demographics)",
        schema.columns().len(),
        schema.questions().len(),
        schema.demographics().len()
    );
    for column in schema.columns() {
        println!(
            "  {:<12} {:<12} [{}, {}]{}  {}",
            column.code(),
            column.column_type(),
            column.min_value(),
            column.max_value(),
            if column.nullable() { " nullable" } else { "" },
            column.text()
        );
    }
}
