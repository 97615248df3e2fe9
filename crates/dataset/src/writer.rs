use crate::error::DatasetError;
use core_types::TransactionTable;
use std::io::Write;

/// Column order of the normalized CSV form, matching what `read_table`
/// expects back.
const OUTPUT_HEADER: [&str; 8] = [
    "InvoiceNo",
    "StockCode",
    "Description",
    "Quantity",
    "UnitPrice",
    "InvoiceDate",
    "CustomerID",
    "Country",
];

/// Writes the normalized table as CSV.
///
/// This is the output half of the one-time conversion path: raw export in,
/// normalized columnar file out. Timestamps are written in the ISO form the
/// loader tries first, so a converted file round-trips without coercion.
pub fn write_csv<W: Write>(table: &TransactionTable, writer: W) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(OUTPUT_HEADER)?;

    for tx in table.rows() {
        let quantity = tx.quantity.to_string();
        let unit_price = tx.unit_price.to_string();
        let invoice_date = tx.invoice_date.format("%Y-%m-%dT%H:%M:%S").to_string();
        csv_writer.write_record([
            tx.invoice_no.as_str(),
            tx.stock_code.as_str(),
            tx.description.as_str(),
            quantity.as_str(),
            unit_price.as_str(),
            invoice_date.as_str(),
            tx.customer_id.as_str(),
            tx.country.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
