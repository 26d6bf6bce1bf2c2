//! Command dispatch.

use crate::cli::{ClassesCommand, Cli, Command, DashboardArgs, StudentCommand};
use anyhow::{bail, Result};
use chrono::Duration;
use std::io::{self, BufRead, Write};
use tracing::{info, instrument};
use vibecheck_client::{
    release_code, ApiClient, ClassRoster, ClassSelection, DashboardFlow, DashboardSelection,
    DashboardState, FileSessionStore, StudentFlow,
};
use vibecheck_config::Config;
use vibecheck_dashboard::{
    export_report, render_report, ChartRenderer, ChartSeries, LineChartRenderer,
};

/// Variable carrying the backend session cookie between invocations.
pub const SESSION_COOKIE_ENV: &str = "VIBECHECK_SESSION_COOKIE";

/// Message printed when a selection has no data.
pub const NO_DATA_MESSAGE: &str = "Nenhum dado disponível para os filtros selecionados.";

/// Run the parsed command against the configured backend.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;

    match cli.command {
        Command::LoginUrl => {
            println!("{}", client.login_url()?);
            if config.api.session_cookie.is_none() {
                println!(
                    "Após o login, defina {SESSION_COOKIE_ENV}=NOME=valor com o cookie de sessão."
                );
            }
        }
        Command::Logout => {
            client.logout().await?;
            println!("Sessão encerrada.");
        }
        Command::Dashboard(args) => dashboard(client, &config, args).await?,
        Command::Classes(command) => classes(client, command).await?,
        Command::Release(args) => {
            let code = release_code(&client, args.event_type, &args.class).await?;
            println!("{code}");
        }
        Command::Student(command) => student(client, &config, command).await?,
    }

    Ok(())
}

#[instrument(skip(client, config))]
async fn dashboard(client: ApiClient, config: &Config, args: DashboardArgs) -> Result<()> {
    let selection = DashboardSelection {
        period: args.period.unwrap_or(config.dashboard.default_period),
        class: args.class,
        event_type: args.event_type,
    };

    let mut flow = DashboardFlow::new(client);
    if matches!(selection.class, ClassSelection::Id(_)) {
        flow.refresh_classes().await;
    }

    let points = match flow.load(&selection).await {
        DashboardState::Failed(message) => bail!(message),
        DashboardState::Empty => {
            println!("{NO_DATA_MESSAGE}");
            Vec::new()
        }
        DashboardState::Ready(points) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print!("{}", render_report(&points));
            }
            points
        }
    };

    if let Some(path) = args.export {
        let path = path.unwrap_or_else(|| config.dashboard.export_file.clone());
        export_report(&points, &path)?;
        println!("Relatório salvo em {}", path.display());
    }

    if let Some(path) = args.chart {
        LineChartRenderer::new(config.dashboard.chart.clone())
            .render_to_file(&ChartSeries::from_points(&points), &path)?;
        println!("Gráfico salvo em {}", path.display());
    }

    Ok(())
}

async fn classes(client: ApiClient, command: ClassesCommand) -> Result<()> {
    let mut roster = ClassRoster::load(client).await?;

    match command {
        ClassesCommand::List { search } => {
            let classes = match search.as_deref() {
                Some(query) => roster.search(query),
                None => roster.classes().iter().collect(),
            };
            for class in classes {
                println!("{}\t{}", class.id, class.name);
            }
        }
        ClassesCommand::Rename { id, name } => {
            roster.rename(id, &name).await?;
            println!("Turma {id} renomeada.");
        }
        ClassesCommand::Delete { id, yes } => {
            let pending = roster.request_delete(id)?;
            let question = format!("Apagar a turma \"{}\"?", pending.class().name);
            if !yes && !confirm(&question, &mut io::stdin().lock())? {
                println!("Exclusão cancelada.");
                return Ok(());
            }
            let deleted = pending.confirm(&mut roster).await?;
            info!("Deleted class {}", deleted.id);
            println!("Turma \"{}\" apagada.", deleted.name);
        }
    }

    Ok(())
}

async fn student(client: ApiClient, config: &Config, command: StudentCommand) -> Result<()> {
    let session = FileSessionStore::new(&config.session.path);
    let flow = StudentFlow::new(client, session).with_code_ttl(Duration::minutes(i64::from(
        config.session.code_ttl_minutes,
    )));

    match command {
        StudentCommand::EnterCode { code } => {
            flow.enter_code(&code).await?;
            println!("Código aceito. Envie sua emoção com `vibecheck student submit`.");
        }
        StudentCommand::Submit { emotion } => {
            flow.submit_emotion(emotion).await?;
            println!("Emoção \"{emotion}\" registrada. Obrigado!");
        }
    }

    Ok(())
}

/// Ask a yes/no question on stdout, reading the answer from `input`.
pub fn confirm(question: &str, input: &mut impl BufRead) -> io::Result<bool> {
    print!("{question} [s/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirm_answers() {
        assert!(confirm("?", &mut Cursor::new("s\n")).unwrap());
        assert!(confirm("?", &mut Cursor::new("Sim\n")).unwrap());
        assert!(!confirm("?", &mut Cursor::new("\n")).unwrap());
        assert!(!confirm("?", &mut Cursor::new("não\n")).unwrap());
    }
}
