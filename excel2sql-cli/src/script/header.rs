//! Script header rendering and task code extraction

use chrono::NaiveDate;

/// Task details captured once per run and rendered into every script header
#[derive(Debug, Clone)]
pub struct TaskMetadata {
    /// Tracker identifier, e.g. `PROCLI-3948`
    pub task_identifier: String,
    pub description: String,
    pub author: String,
    pub created_at: NaiveDate,
}

/// Extract the numeric task code from an identifier like `PROCLI-3948`
///
/// The code is the digit run immediately after the last `-`. An identifier
/// without one yields `None`; output naming tolerates the absence instead
/// of failing the run.
pub fn task_code(identifier: &str) -> Option<String> {
    let (_, tail) = identifier.rsplit_once('-')?;
    let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// Render the fixed comment header and transaction preamble
///
/// The layout is a compatibility contract with script reviewers: field
/// order, labels and separator lines are significant output, not cosmetic.
pub fn build_header(metadata: &TaskMetadata, task_link_base: &str) -> String {
    // Deployment dates are filled in by hand at each promotion stage
    let deploy_dev = "";
    let deploy_pre = "";
    let deploy_prod = "";

    format!(
        "
/*
* (EST): Estructura.
* (DAT): Modificación Datos.
* (QRY): Consultas.
*/
-------------------------------------------------------------------------------------
/*
* LINK TAREA: {link_base}{task}
* DESCRIPCIÓN: {description}
*
*
* AUTOR: {author}
* FECHA CREACIÓN: {created_at}
* FECHA DESPLIEGUE DESARROLLO: {deploy_dev}
* FECHA DESPLIEGUE PRE-PRODUCCIÓN: {deploy_pre}
* FECHA DESPLIEGUE PRODUCCIÓN: {deploy_prod}
*/
-------------------------------------------------------------------------------------
---
-------------------------------------------------
---
-------------------------------------------------
BEGIN TRAN
",
        link_base = task_link_base,
        task = metadata.task_identifier,
        description = metadata.description,
        author = metadata.author,
        created_at = metadata.created_at.format("%Y-%m-%d"),
    )
}
