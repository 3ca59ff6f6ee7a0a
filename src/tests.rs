#[cfg(test)]
mod integration_tests {
    use clap::Parser;
    use common::ApiError;
    use session::{AnalysisOrchestrator, Connectivity, SearchSession, Slot, SlotState};

    use crate::cli::{Cli, Commands, commands};
    use crate::client::ClimateClient;
    use crate::config::Settings;
    use crate::runner::{run_analysis, search_once};
    use crate::test_utils::test_utils::{
        FAILING_QUERY, init_test_tracing, output, spawn_backend, spawn_unhealthy_backend,
    };

    // ===================== Client contracts =====================

    #[tokio::test]
    async fn test_client_search_decodes_locations() {
        let _guard = init_test_tracing();
        let backend = spawn_backend().await;
        let client = backend.client();

        let locations = client.search("paris", 10).await.unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].label(), "Paris, Île-de-France, France");
        assert_eq!(locations[1].admin1.as_deref(), Some("Texas"));

        let limited = client.search("paris", 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_client_search_error_carries_detail() {
        let backend = spawn_backend().await;
        let err = backend.client().search(FAILING_QUERY, 10).await.unwrap_err();
        assert_eq!(err, ApiError::Application("geocoder down".to_string()));
    }

    #[tokio::test]
    async fn test_client_analyze_rejection_surfaces_detail() {
        let backend = spawn_backend().await;
        let client = backend.client();

        let atlantis = client.search("atlantis", 10).await.unwrap();
        let err = client
            .analyze(&atlantis[0].to_location_data())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "bad coords");
    }

    #[tokio::test]
    async fn test_client_transport_error() {
        let backend = spawn_backend().await;
        let settings = Settings {
            base_url: "http://127.0.0.1:9/api".to_string(),
            ..backend.settings()
        };
        let client = ClimateClient::new(&settings).unwrap();

        let err = client.health().await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_client_legacy_lookup() {
        let backend = spawn_backend().await;
        let client = backend.client();

        let location = client.legacy_lookup("Copenhagen").await.unwrap();
        assert_eq!(location.label(), "Copenhagen, Capital Region, Denmark");
        assert_eq!(location.population, Some(1_153_615));

        let err = client.legacy_lookup("Nowhere Town").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Application("Location 'Nowhere Town' not found".to_string())
        );
    }

    // ===================== Session hosting =====================

    #[tokio::test]
    async fn test_search_once_fills_session() {
        let backend = spawn_backend().await;
        let client = backend.client();
        let mut session = SearchSession::new(backend.settings().search_config());

        search_once(&client, &mut session, "hel").await;
        assert_eq!(session.query(), "hel");
        assert!(!session.is_loading());
        assert!(session.is_open());
        assert_eq!(session.suggestions().len(), 1);
        assert_eq!(session.suggestions()[0].name, "Helsinki");
    }

    #[tokio::test]
    async fn test_search_once_failure_is_silent() {
        let backend = spawn_backend().await;
        let client = backend.client();
        let mut session = SearchSession::new(backend.settings().search_config());

        search_once(&client, &mut session, FAILING_QUERY).await;
        assert!(session.suggestions().is_empty());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_run_analysis_without_current_location_is_noop() {
        let backend = spawn_backend().await;
        let client = backend.client();
        let mut orchestrator = AnalysisOrchestrator::new();

        run_analysis(&client, &mut orchestrator).await;
        assert_eq!(orchestrator.state(Slot::Current), &SlotState::Idle);
        assert_eq!(orchestrator.state(Slot::Target), &SlotState::Idle);
        assert!(!orchestrator.show_comparison());
        assert_eq!(orchestrator.connectivity(), Connectivity::Connected);
    }

    #[tokio::test]
    async fn test_run_analysis_fills_both_slots() {
        let backend = spawn_backend().await;
        let client = backend.client();

        let mut orchestrator = AnalysisOrchestrator::new();
        let copenhagen = client.search("copenhagen", 1).await.unwrap().remove(0);
        let helsinki = client.search("helsinki", 1).await.unwrap().remove(0);
        orchestrator.set_current_location(Some(copenhagen));
        orchestrator.set_target_location(Some(helsinki));

        run_analysis(&client, &mut orchestrator).await;

        let current = orchestrator.state(Slot::Current).data().unwrap();
        let target = orchestrator.state(Slot::Target).data().unwrap();
        assert_eq!(current.resilience_score, Some(56.0));
        assert_eq!(target.resilience_score, Some(60.0));
        assert!(!orchestrator.loading());
        assert_eq!(orchestrator.error(), None);
        assert_eq!(orchestrator.connectivity(), Connectivity::Connected);
    }

    // ===================== Commands =====================

    #[tokio::test]
    async fn test_search_command_lists_matches() {
        let backend = spawn_backend().await;
        let mut out = Vec::new();

        commands::search(&backend.client(), &backend.settings(), "par", None, &mut out)
            .await
            .unwrap();
        let text = output(out);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with(" 1. Paris, Île-de-France, France"));
        assert!(text.contains(" 2. Paris, Texas, United States"));
    }

    #[tokio::test]
    async fn test_search_command_limit_and_short_query() {
        let backend = spawn_backend().await;
        let client = backend.client();
        let settings = backend.settings();

        let mut out = Vec::new();
        commands::search(&client, &settings, "par", Some(1), &mut out)
            .await
            .unwrap();
        assert_eq!(output(out).lines().count(), 1);

        let mut out = Vec::new();
        commands::search(&client, &settings, " p ", None, &mut out)
            .await
            .unwrap();
        assert_eq!(output(out), "no matches\n");

        let mut out = Vec::new();
        commands::search(&client, &settings, FAILING_QUERY, None, &mut out)
            .await
            .unwrap();
        assert_eq!(output(out), "no matches\n");
    }

    #[tokio::test]
    async fn test_analyze_command_prints_both_reports() {
        let backend = spawn_backend().await;
        let mut out = Vec::new();

        commands::analyze(
            &backend.client(),
            &backend.settings(),
            "copenhagen",
            Some("helsinki"),
            1,
            &mut out,
        )
        .await
        .unwrap();

        let text = output(out);
        let (current, target) = text.split_once("== Target Location ==").unwrap();
        assert!(current.starts_with("== Current Location ==\nCopenhagen, Denmark\n"));
        assert!(current.contains("Climate Resilience   [###########---------]  56 (poor)"));
        assert!(current.contains("Month: June"));
        assert!(target.contains("Helsinki, Finland"));
        assert!(target.contains("Resilience Score       60"));
        assert!(target.contains("Last updated: 2026-06-01 12:00"));
    }

    #[tokio::test]
    async fn test_analyze_command_pick_selects_suggestion() {
        let backend = spawn_backend().await;
        let mut out = Vec::new();

        commands::analyze(&backend.client(), &backend.settings(), "paris", None, 2, &mut out)
            .await
            .unwrap();

        let text = output(out);
        assert!(text.contains("Paris, United States"));
        assert!(text.contains("Resilience Score       34"));
        assert!(!text.contains("Target Location"));
    }

    #[tokio::test]
    async fn test_analyze_command_surfaces_backend_error() {
        let backend = spawn_backend().await;
        let mut out = Vec::new();

        let err = commands::analyze(
            &backend.client(),
            &backend.settings(),
            "atlantis",
            None,
            1,
            &mut out,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "bad coords");
        assert!(output(out).contains("== Current Location ==\nError: bad coords\n"));
    }

    #[tokio::test]
    async fn test_analyze_command_unresolvable_queries() {
        let backend = spawn_backend().await;
        let client = backend.client();
        let settings = backend.settings();

        let err = commands::analyze(&client, &settings, "zzzz", None, 1, &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No locations found for 'zzzz'");

        let err = commands::analyze(&client, &settings, "helsinki", None, 3, &mut Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("cannot pick #3"));
    }

    #[tokio::test]
    async fn test_compare_command_prints_insights() {
        let backend = spawn_backend().await;
        let mut out = Vec::new();

        commands::compare(&backend.client(), "Madrid", "Bergen", &mut out)
            .await
            .unwrap();

        let text = output(out);
        assert!(text.contains("== Current Location ==\nMadrid\n"));
        assert!(text.contains("== Target Location ==\nBergen\n"));
        assert!(text.contains("More resilient         Bergen"));
        assert!(text.contains("Score difference       23"));
        assert!(text.contains("2050 Change            +1.1°C vs +1.1°C"));
        assert!(text.contains("Bergen shows better climate resilience"));
        assert!(!text.contains("Target warms less"));
    }

    #[tokio::test]
    async fn test_lookup_command() {
        let backend = spawn_backend().await;
        let mut out = Vec::new();

        commands::lookup(&backend.client(), "Helsinki", &mut out)
            .await
            .unwrap();

        let text = output(out);
        assert!(text.starts_with("Helsinki, Uusimaa, Finland\n"));
        assert!(text.contains("Population   658,864"));
        assert!(text.contains("Timezone     Europe/Helsinki"));
    }

    #[tokio::test]
    async fn test_health_command() {
        let backend = spawn_backend().await;
        let mut out = Vec::new();
        commands::health(&backend.client(), &mut out).await.unwrap();
        assert_eq!(
            output(out),
            format!("{}: healthy (climate-migration-api)\n", backend.base_url)
        );

        let degraded = spawn_unhealthy_backend().await;
        let mut out = Vec::new();
        let err = commands::health(&degraded.client(), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("is not healthy"));
        assert!(output(out).contains("degraded"));
    }

    // ===================== Argument parsing =====================

    #[tokio::test]
    async fn test_cli_dispatches_parsed_command() {
        let backend = spawn_backend().await;

        let cli = Cli::try_parse_from([
            "climate-advisor",
            "analyze",
            "--current",
            "paris",
            "--target",
            "helsinki",
            "--pick",
            "1",
            "--base-url",
            backend.base_url.as_str(),
        ])
        .unwrap();
        assert_eq!(cli.config.base_url.as_deref(), Some(backend.base_url.as_str()));
        assert!(matches!(cli.command, Commands::Analyze { pick: 1, .. }));

        let settings = Settings::load(&cli.config).unwrap();
        let client = ClimateClient::new(&settings).unwrap();
        let mut out = Vec::new();
        cli.command
            .execute(&client, &settings, &mut out)
            .await
            .unwrap();

        let text = output(out);
        assert!(text.contains("Paris, France"));
        assert!(text.contains("Helsinki, Finland"));
    }

    #[test]
    fn test_cli_rejects_pick_zero() {
        let result = Cli::try_parse_from(["climate-advisor", "analyze", "--current", "oslo", "--pick", "0"]);
        assert!(result.is_err());
    }
}
