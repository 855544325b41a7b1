//! Snapshot tests for end-to-end transpilation.
//!
//! These tests render templates from a directory and compare the composed
//! SQL with the expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::{fs, path::Path};

use jinjasql_codegen::{Catalog, Settings, Transpiler};
use jinjasql_manifest::{Mode, PRESETS_FILE, PresetStore, SessionOptions};
use tempfile::TempDir;

const VEHICLES: &str = r#"{% extends "jst/table.sql.jinja" %}

{% block name %}data_owner.Vehicles{% endblock %}

{% block columns %}
    ID INT NOT NULL,
    Plate NVARCHAR(20) NULL,
    Retired BIT NOT NULL
{%- endblock %}
"#;

const GET_VEHICLE: &str = r#"{% extends "mssql/procedure.sql.jinja" %}

{% block name %}data_owner.GetVehicle{% endblock %}

{% block parameters %}
    @vehicleId INT,
    @plate NVARCHAR(20) = NULL,
    @since DATETIME2
{%- endblock %}

{% block logic %}
    SELECT *
    FROM data_owner.Vehicles
    WHERE ID = @vehicleId
{%- endblock %}
"#;

const LIST_VEHICLES: &str = r#"{% extends "mssql/procedure.sql.jinja" %}

{% block name %}data_owner.ListVehicles{% endblock %}

{% block logic %}
    SELECT {% include "part_columns.sql.jinja" %} FROM data_owner.Vehicles
    WHERE Retired = 0
{%- endblock %}
"#;

/// Write the templates into a temporary templates directory.
fn templates(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        let path = temp.path().join(name);
        fs::create_dir_all(path.parent().unwrap_or(Path::new("."))).unwrap();
        fs::write(path, content).unwrap();
    }
    temp
}

#[test]
fn test_table_replace() {
    let dir = templates(&[("tables/vehicles.sql.jinja", VEHICLES)]);
    let catalog = Catalog::builtin().unwrap();
    let transpiler = Transpiler::from_dir(&catalog, dir.path(), Settings::new(Mode::Replace));

    let out = transpiler
        .transpile("tables/vehicles.sql.jinja", None)
        .unwrap();
    insta::assert_snapshot!("table_replace", out.text);
}

#[test]
fn test_procedure_debug_with_presets() {
    let dir = templates(&[("procs/get_vehicle.sql.jinja", GET_VEHICLE)]);
    let catalog = Catalog::builtin().unwrap();
    let presets = PresetStore::from_str_with_filename(
        r#"{ "procs/get_vehicle.sql.jinja": { "@vehicleId": 42 } }"#,
        PRESETS_FILE,
    )
    .unwrap();
    let transpiler = Transpiler::from_dir(&catalog, dir.path(), Settings::new(Mode::Debug));

    let out = transpiler
        .transpile(
            "procs/get_vehicle.sql.jinja",
            presets.get("procs/get_vehicle.sql.jinja"),
        )
        .unwrap();
    insta::assert_snapshot!("procedure_debug", out.text);
}

#[test]
fn test_procedure_create_with_partial() {
    let dir = templates(&[
        ("procs/list_vehicles.sql.jinja", LIST_VEHICLES),
        ("part_columns.sql.jinja", "ID, Plate, Retired"),
    ]);
    let catalog = Catalog::builtin().unwrap();
    let settings = Settings::new(Mode::Create).with_session(SessionOptions {
        ansi_nulls: false,
        quoted_id: true,
    });
    let transpiler = Transpiler::from_dir(&catalog, dir.path(), settings);

    let out = transpiler
        .transpile("procs/list_vehicles.sql.jinja", None)
        .unwrap();
    insta::assert_snapshot!("procedure_create", out.text);
}
