use super::*;
use crate::builder::DomainImportOptions;
use gridcfg_core::{DbColumn, DbTable, JdbcDriver};
use gridcfg_settings::PresetCatalog;

fn driver(jar: &str, class: &str) -> JdbcDriver {
    JdbcDriver {
        jdbc_driver_jar: jar.into(),
        jdbc_driver_class: class.into(),
    }
}

fn drivers() -> Vec<JdbcDriver> {
    vec![
        driver("postgresql-42.jar", "org.postgresql.Driver"),
        driver("h2-1.4.jar", "org.h2.Driver"),
        driver("mysql-connector.jar", "com.mysql.jdbc.Driver"),
    ]
}

fn table(schema: &str, name: &str, with_key: bool) -> DbTable {
    DbTable {
        schema: schema.into(),
        tbl: name.into(),
        cols: vec![DbColumn {
            name: "ID".into(),
            jdbc_type: 4,
            nullable: false,
            key: with_key,
        }],
        idxs: vec![],
    }
}

fn options() -> DomainImportOptions {
    DomainImportOptions {
        package_name: "com.corp.model".into(),
        ..Default::default()
    }
}

fn at_connect() -> ImportWizard {
    ImportWizard::start(false, options())
        .drivers_loaded(drivers(), &PresetCatalog::builtin())
        .unwrap()
}

fn at_schemas(schemas: &[&str]) -> ImportWizard {
    at_connect()
        .schemas_loaded(schemas.iter().map(|s| s.to_string()).collect())
        .unwrap()
}

fn at_tables() -> ImportWizard {
    at_schemas(&["PUBLIC"])
        .tables_loaded(vec![
            table("PUBLIC", "CAR", true),
            table("PUBLIC", "LOG", false),
        ])
        .unwrap()
}

mod driver_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_start_is_drivers_step() {
        let wizard = ImportWizard::start(false, options());
        assert_eq!(wizard.step(), WizardStep::Drivers);
        assert_eq!(wizard.loading_text(), LOADING_JDBC_DRIVERS);
        assert!(!wizard.next_enabled());
    }

    #[test]
    fn test_drivers_sorted_and_first_selected() {
        let wizard = at_connect();

        let jars: Vec<_> = wizard
            .drivers()
            .iter()
            .map(|d| d.jdbc_driver_jar.as_str())
            .collect();
        assert_eq!(jars, vec!["h2-1.4.jar", "mysql-connector.jar", "postgresql-42.jar"]);

        assert_eq!(wizard.step(), WizardStep::Connect);
        assert_eq!(wizard.connection().db, "h2");
        assert_eq!(wizard.connection().jdbc_driver_jar, "h2-1.4.jar");
        assert_eq!(wizard.info(), INFO_CONNECT_TO_DB);
        assert_eq!(wizard.loading_text(), LOADING_SCHEMAS);
    }

    #[test]
    fn test_no_drivers_fails() {
        let wizard = ImportWizard::start(false, options())
            .drivers_loaded(vec![], &PresetCatalog::builtin())
            .unwrap();

        assert_eq!(wizard.step(), WizardStep::Failed);
        assert_eq!(wizard.failure(), Some(NO_DRIVERS_MESSAGE));
        assert!(wizard.cancel().is_err());
    }

    #[test]
    fn test_select_driver_loads_preset() {
        let wizard = at_connect()
            .select_driver_class("com.mysql.jdbc.Driver", &PresetCatalog::builtin())
            .unwrap();

        assert_eq!(wizard.connection().db, "mysql");
        assert_eq!(wizard.connection().user, "root");
        assert_eq!(
            wizard.selected_driver().map(|d| d.jdbc_driver_class.as_str()),
            Some("com.mysql.jdbc.Driver")
        );
    }

    #[test]
    fn test_select_driver_out_of_range() {
        let wizard = at_connect();
        assert_eq!(
            wizard.select_driver(10, &PresetCatalog::builtin()),
            Err(WizardError::IndexOutOfRange { index: 10 })
        );
    }

    #[test]
    fn test_update_connection() {
        let wizard = at_connect()
            .update_connection(|c| {
                c.jdbc_url = "jdbc:h2:tcp://localhost/test".into();
                c.password = "pw".into();
            })
            .unwrap();

        let request = wizard.schemas_request().unwrap();
        assert_eq!(request.preset.jdbc_url, "jdbc:h2:tcp://localhost/test");
        assert_eq!(request.preset.password, "pw");
        assert!(request.remember);
    }
}

mod demo_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_demo_picks_h2_driver() {
        let wizard = ImportWizard::start(true, options())
            .drivers_loaded(drivers(), &PresetCatalog::builtin())
            .unwrap();

        assert_eq!(wizard.connection().db, "H2");
        assert_eq!(wizard.connection().jdbc_url, "jdbc:h2:mem:demo-db");
        assert_eq!(wizard.connection().jdbc_driver_jar, "h2-1.4.jar");
        assert_eq!(wizard.button(), NextButton::Next);
        assert!(wizard.options().demo);

        let request = wizard.schemas_request().unwrap();
        assert!(!request.remember);
    }

    #[test]
    fn test_demo_without_h2_cancels() {
        let wizard = ImportWizard::start(true, options())
            .drivers_loaded(
                vec![driver("ojdbc.jar", "oracle.jdbc.OracleDriver")],
                &PresetCatalog::builtin(),
            )
            .unwrap();

        assert_eq!(wizard.connection().db, "unknown");
        assert!(wizard.next_cancels());
        assert_eq!(wizard.button(), NextButton::Cancel);
        assert_eq!(wizard.button().label(), "Cancel");
        assert_eq!(
            wizard.schemas_request(),
            Err(WizardError::DemoDriverUnavailable)
        );
        assert!(wizard.next_tooltip().starts_with("Resolve issue with H2 database driver"));
    }

    #[test]
    fn test_demo_connection_is_fixed() {
        let wizard = ImportWizard::start(true, options())
            .drivers_loaded(drivers(), &PresetCatalog::builtin())
            .unwrap();

        assert!(wizard.update_connection(|c| c.user = "x".into()).is_err());
        assert!(wizard.select_driver(0, &PresetCatalog::builtin()).is_err());
    }

    #[test]
    fn test_demo_flag_survives_option_edits() {
        let wizard = ImportWizard::start(true, options())
            .update_options(|o| o.demo = false)
            .unwrap();
        assert!(wizard.options().demo);
    }

    #[test]
    fn test_demo_prev_tooltip() {
        let wizard = ImportWizard::start(true, options())
            .drivers_loaded(drivers(), &PresetCatalog::builtin())
            .unwrap()
            .schemas_loaded(vec!["PUBLIC".into()])
            .unwrap();

        assert_eq!(
            wizard.prev_tooltip(),
            Some("Click to return on demo description step")
        );
    }
}

mod schema_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schemas_start_selected() {
        let wizard = at_schemas(&["PUBLIC", "SALES"]);

        assert_eq!(wizard.step(), WizardStep::Schemas);
        assert!(wizard.schemas().iter().all(|s| s.selected));
        assert!(wizard.all_schemas_selected());
        assert_eq!(wizard.info(), INFO_SELECT_SCHEMAS);
        assert_eq!(wizard.loading_text(), LOADING_TABLES);
    }

    #[test]
    fn test_empty_schema_list_enables_next() {
        let wizard = at_schemas(&[]);

        assert!(wizard.next_enabled());
        assert!(!wizard.all_schemas_selected());
        assert_eq!(wizard.tables_request().unwrap().schemas, Vec::<String>::new());
    }

    #[test]
    fn test_no_checked_schema_disables_next() {
        let wizard = at_schemas(&["PUBLIC"]).select_all_schemas(false).unwrap();

        assert!(!wizard.next_enabled());
        assert_eq!(wizard.next_tooltip(), "Select schemas to continue");
        assert_eq!(
            wizard.tables_request(),
            Err(WizardError::NextDisabled("Select schemas to continue"))
        );
    }

    #[test]
    fn test_toggle_keeps_all_selected_consistent() {
        let wizard = at_schemas(&["PUBLIC", "SALES"]);

        let wizard = wizard.toggle_schema(1, false).unwrap();
        assert!(!wizard.all_schemas_selected());

        let wizard = wizard.toggle_schema(1, true).unwrap();
        assert!(wizard.all_schemas_selected());
    }

    #[test]
    fn test_tables_request_carries_selected_schemas() {
        let wizard = at_schemas(&["PUBLIC", "SALES", "HR"])
            .select_schemas_named(&["SALES".into(), "HR".into()])
            .unwrap();

        let preset = wizard.tables_request().unwrap();
        assert_eq!(preset.schemas, vec!["SALES".to_string(), "HR".to_string()]);
        assert_eq!(preset.jdbc_driver_class, "org.h2.Driver");
    }

    #[test]
    fn test_unknown_schema_name() {
        let wizard = at_schemas(&["PUBLIC"]);
        assert_eq!(
            wizard.select_schemas_named(&["NOPE".into()]),
            Err(WizardError::UnknownItem {
                kind: "schema",
                name: "NOPE".into()
            })
        );
    }
}

mod table_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tables_with_key_start_selected() {
        let wizard = at_tables();

        let selected: Vec<_> = wizard.tables().iter().map(|t| t.selected).collect();
        assert_eq!(selected, vec![true, false]);
        assert!(!wizard.all_tables_selected());
        assert_eq!(wizard.tables()[0].label(), "PUBLIC.CAR");
        assert_eq!(wizard.info(), INFO_SELECT_TABLES);
    }

    #[test]
    fn test_zero_checked_tables_disables_next() {
        let wizard = at_tables().select_all_tables(false).unwrap();

        assert!(!wizard.next_enabled());
        assert_eq!(wizard.next_tooltip(), "Select tables to continue");
        assert_eq!(
            wizard.show_options(),
            Err(WizardError::NextDisabled("Select tables to continue"))
        );
    }

    #[test]
    fn test_select_tables_by_name_or_label() {
        let wizard = at_tables()
            .select_tables_named(&["LOG".into(), "PUBLIC.CAR".into()])
            .unwrap();

        assert!(wizard.all_tables_selected());
        assert_eq!(wizard.selected_tables().count(), 2);
    }

    #[test]
    fn test_options_step() {
        let wizard = at_tables().show_options().unwrap();

        assert_eq!(wizard.step(), WizardStep::Options);
        assert_eq!(wizard.button(), NextButton::Save);
        assert_eq!(wizard.info(), INFO_SELECT_OPTIONS);
        assert_eq!(wizard.loading_text(), SAVING_DOMAINS);
        assert_eq!(
            wizard.next_tooltip(),
            "Click to import domain model for selected tables"
        );

        let saved = wizard.complete().unwrap();
        assert_eq!(saved.step(), WizardStep::Saved);
    }
}

mod navigation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_previous_mirrors_next() {
        let options = at_tables().show_options().unwrap();

        let tables = options.previous().unwrap();
        assert_eq!(tables.step(), WizardStep::Tables);
        assert_eq!(tables.button(), NextButton::Next);

        let schemas = tables.previous().unwrap();
        assert_eq!(schemas.step(), WizardStep::Schemas);

        let connect = schemas.previous().unwrap();
        assert_eq!(connect.step(), WizardStep::Connect);
    }

    #[test]
    fn test_previous_skips_empty_schema_list() {
        let wizard = at_schemas(&[])
            .tables_loaded(vec![table("PUBLIC", "CAR", true)])
            .unwrap();

        assert_eq!(wizard.previous().unwrap().step(), WizardStep::Connect);
    }

    #[test]
    fn test_connect_is_the_floor() {
        let wizard = at_connect();
        assert_eq!(
            wizard.previous(),
            Err(WizardError::InvalidTransition {
                step: WizardStep::Connect,
                action: "go back"
            })
        );
        assert_eq!(wizard.prev_tooltip(), None);
    }

    #[test]
    fn test_prev_tooltips() {
        assert_eq!(
            at_schemas(&["PUBLIC"]).prev_tooltip(),
            Some("Click to return on connection configuration step")
        );
        assert_eq!(
            at_tables().prev_tooltip(),
            Some("Click to return on schemas selection step")
        );
        assert_eq!(
            at_tables().show_options().unwrap().prev_tooltip(),
            Some("Click to return on tables selection step")
        );
    }

    #[test]
    fn test_wrong_state_is_rejected_and_state_kept() {
        let wizard = at_connect();
        let before = wizard.clone();

        let err = wizard.tables_loaded(vec![]).unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidTransition {
                step: WizardStep::Connect,
                action: "show tables"
            }
        );
        assert_eq!(wizard, before);
        assert!(wizard.complete().is_err());
        assert!(wizard.toggle_table(0, true).is_err());
    }

    #[test]
    fn test_cancel_from_any_open_step() {
        assert_eq!(
            ImportWizard::start(false, options()).cancel().unwrap().step(),
            WizardStep::Cancelled
        );
        assert_eq!(at_tables().cancel().unwrap().step(), WizardStep::Cancelled);

        let saved = at_tables().show_options().unwrap().complete().unwrap();
        assert!(saved.cancel().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = at_connect().show_options().unwrap_err();
        assert_eq!(err.to_string(), "Cannot show options in connect step");
    }
}
