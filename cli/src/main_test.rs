use clap::Parser;

use super::*;

#[test]
fn defaults_point_at_local_service() {
    let cli = Cli::try_parse_from(["lexgenie", "cases", "list"]).unwrap();
    assert_eq!(cli.cases_url, DEFAULT_SERVICE_URL);
    assert_eq!(cli.rag_url, DEFAULT_SERVICE_URL);
    assert!(!cli.json);
    assert!(matches!(
        cli.command,
        Command::Cases(CasesCommand { command: CasesSubcommand::List { search: None } })
    ));
}

#[test]
fn json_flag_is_global() {
    let cli = Cli::try_parse_from(["lexgenie", "rag", "summarize", "brief.txt", "--json"]).unwrap();
    assert!(cli.json);
}

#[test]
fn ask_requires_query() {
    assert!(Cli::try_parse_from(["lexgenie", "rag", "ask", "brief.txt"]).is_err());
    let cli = Cli::try_parse_from(["lexgenie", "rag", "ask", "brief.txt", "--query", "Valid?"]).unwrap();
    match cli.command {
        Command::Rag(RagCommand { command: RagSubcommand::Ask { file, query } }) => {
            assert_eq!(file, PathBuf::from("brief.txt"));
            assert_eq!(query, "Valid?");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn add_takes_kebab_case_image_url() {
    let cli = Cli::try_parse_from([
        "lexgenie", "cases", "add", "--title", "T", "--description", "D", "--image-url", "https://img/x.png",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Command::Cases(CasesCommand { command: CasesSubcommand::Add { ref image_url, .. } }) if image_url == "https://img/x.png"
    ));
}

#[test]
fn pick_case_is_one_based() {
    let cases = vec![
        Case { title: "A".into(), ..Case::default() },
        Case { title: "B".into(), ..Case::default() },
    ];
    assert_eq!(pick_case(&cases, 2).unwrap().title, "B");
    assert!(matches!(pick_case(&cases, 0), Err(CliError::NoSuchCase { index: 0, count: 2 })));
    assert!(matches!(pick_case(&cases, 3), Err(CliError::NoSuchCase { index: 3, count: 2 })));
}

#[test]
fn add_errors_use_form_messages() {
    let err = CliError::from(AddCaseError::Api(ApiError::Transport("refused".into())));
    assert_eq!(err.to_string(), docket::error::MSG_ADD_FAILED);
}
