//! Record and collection command handlers

use anyhow::{bail, Context, Result};
use serde_json::Value;

use scroll_core::{Driver, StoreError};

use crate::output::Output;
use crate::prompt::confirm;

/// Write a JSON value as `<collection>/<resource>`
pub fn write(
    db: &Driver,
    collection: String,
    resource: String,
    value: String,
    output: &Output,
) -> Result<()> {
    let value: Value = serde_json::from_str(&value).context("Value is not valid JSON")?;

    db.write(&collection, &resource, &value)
        .with_context(|| format!("Failed to write {}/{}", collection, resource))?;

    output.success(&format!("Wrote {}/{}", collection, resource));
    Ok(())
}

/// Show one record
pub fn read(db: &Driver, collection: String, resource: String, output: &Output) -> Result<()> {
    let value: Value = match db.read(&collection, &resource) {
        Ok(value) => value,
        Err(e) if e.is_not_found() => bail!("Record not found: {}/{}", collection, resource),
        Err(e) => return Err(e).context("Failed to read record"),
    };

    output.print_record(&value)
}

/// Show every record in a collection
pub fn list(db: &Driver, collection: String, output: &Output) -> Result<()> {
    let records = match db.read_all(&collection) {
        Ok(records) => records,
        Err(e) if e.is_not_found() => bail!("Collection not found: {}", collection),
        Err(e) => return Err(e).context("Failed to read collection"),
    };

    output.print_records(&collection, &records)
}

/// Delete one record
pub fn delete(
    db: &Driver,
    collection: String,
    resource: String,
    yes: bool,
    output: &Output,
) -> Result<()> {
    if !yes && output.should_prompt() {
        println!("Delete record: {}/{}", collection, resource);
        if !confirm("Are you sure?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    db.delete(&collection, &resource)
        .map_err(|e| not_found_as(e, format!("Record not found: {}/{}", collection, resource)))
        .context("Failed to delete record")?;

    output.success(&format!("Deleted {}/{}", collection, resource));
    Ok(())
}

/// Delete a collection and every record in it
pub fn drop_collection(db: &Driver, collection: String, yes: bool, output: &Output) -> Result<()> {
    if !yes && output.should_prompt() {
        println!("Delete collection '{}' and all of its records", collection);
        if !confirm("Are you sure?")? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    db.delete_collection(&collection)
        .map_err(|e| not_found_as(e, format!("Collection not found: {}", collection)))
        .context("Failed to delete collection")?;

    output.success(&format!("Deleted collection {}", collection));
    Ok(())
}

fn not_found_as(error: StoreError, message: String) -> anyhow::Error {
    if error.is_not_found() {
        anyhow::anyhow!(message)
    } else {
        error.into()
    }
}
