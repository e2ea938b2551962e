use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::{Map, Value};
use vb_core::enums::EntityKind;
use vb_core::schema::{Entity, Record};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RecordCommands;
use crate::commands::fields::parse_assignments;
use crate::context::AppContext;
use crate::output::output;

/// Field whose `-` value is read from a hidden prompt instead of argv.
const SECRET_FIELD: &str = "password";

#[derive(Debug, Serialize)]
struct DeleteResponse {
    kind: EntityKind,
    id: i64,
    deleted: bool,
}

/// Handle `vbk <kind> ...` for any record kind.
pub async fn handle<E: Entity>(
    action: &RecordCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.service.records::<E>();
    match action {
        RecordCommands::List => output(&store.list().await?, flags.format),
        RecordCommands::Get { id } => {
            let record = store
                .get(*id)
                .await?
                .with_context(|| format!("{} {id} not found", E::KIND))?;
            output(&record, flags.format)
        }
        RecordCommands::Add { fields } => {
            let mut assigned = parse_assignments::<E>(fields)?;
            read_secret_fields::<E>(&mut assigned).await?;
            let entity = E::from_fields(assigned)?;
            let id = store.insert(&entity).await?;
            output(&Record::new(id, entity), flags.format)
        }
        RecordCommands::Update { id, fields } => {
            let existing = store
                .get(*id)
                .await?
                .with_context(|| format!("{} {id} not found", E::KIND))?;
            let mut assigned = parse_assignments::<E>(fields)?;
            read_secret_fields::<E>(&mut assigned).await?;
            let entity = E::from_fields(merge_fields(&existing.fields, assigned)?)?;
            store.update(*id, &entity).await?;
            output(&Record::new(*id, entity), flags.format)
        }
        RecordCommands::Delete { id } => {
            store.delete(*id).await?;
            output(
                &DeleteResponse {
                    kind: E::KIND,
                    id: *id,
                    deleted: true,
                },
                flags.format,
            )
        }
    }
}

/// Overlay `changes` onto the stored fields of `existing`.
fn merge_fields<E: Entity>(
    existing: &E,
    changes: Map<String, Value>,
) -> anyhow::Result<Map<String, Value>> {
    let Value::Object(mut merged) = serde_json::to_value(existing)? else {
        bail!("{} did not serialize to an object", E::KIND);
    };
    merged.extend(changes);
    Ok(merged)
}

fn wants_secret_prompt<E: Entity>(fields: &Map<String, Value>) -> bool {
    E::KIND == EntityKind::Password
        && fields.get(SECRET_FIELD).and_then(Value::as_str) == Some("-")
}

async fn read_secret_fields<E: Entity>(fields: &mut Map<String, Value>) -> anyhow::Result<()> {
    if !wants_secret_prompt::<E>(fields) {
        return Ok(());
    }
    let secret =
        tokio::task::spawn_blocking(|| rpassword::prompt_password(format!("{SECRET_FIELD}: ")))
            .await
            .context("password prompt task failed")?
            .context("failed to read password from terminal")?;
    fields.insert(SECRET_FIELD.to_string(), Value::String(secret));
    Ok(())
}
