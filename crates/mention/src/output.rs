use crate::cli::OutputFormat;
use colored::Colorize;
use github_client::GithubError;
use mention_core::{GithubResource, IssueResource, ParsedGithubUrl, PullResource, RepoResource, UserResource};
use serde::Serialize;

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    // Typed fetch errors keep their coarse classification in JSON output
    let code = err
        .downcast_ref::<GithubError>()
        .map(|e| e.code())
        .unwrap_or("error");

    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: code.to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for ParsedGithubUrl {
    fn display(&self) -> String {
        match self {
            ParsedGithubUrl::Pull {
                owner,
                repo,
                number,
            } => format!(
                "{} {}/{}#{}",
                "pull".magenta().bold(),
                owner.cyan(),
                repo.cyan(),
                number
            ),
            ParsedGithubUrl::Issue {
                owner,
                repo,
                number,
            } => format!(
                "{} {}/{}#{}",
                "issue".yellow().bold(),
                owner.cyan(),
                repo.cyan(),
                number
            ),
            ParsedGithubUrl::Repo { owner, repo } => {
                format!("{} {}/{}", "repo".green().bold(), owner.cyan(), repo.cyan())
            }
            ParsedGithubUrl::User { username } => {
                format!("{} {}", "user".blue().bold(), username.cyan())
            }
            ParsedGithubUrl::Unknown => "unknown".dimmed().to_string(),
        }
    }
}

impl Displayable for GithubResource {
    fn display(&self) -> String {
        match self {
            GithubResource::Pull(p) => p.display(),
            GithubResource::Issue(i) => i.display(),
            GithubResource::User(u) => u.display(),
            GithubResource::Repo(r) => r.display(),
        }
    }
}

impl Displayable for PullResource {
    fn display(&self) -> String {
        let state = if self.merged {
            "merged".magenta().bold().to_string()
        } else if self.draft {
            "draft".dimmed().to_string()
        } else {
            match self.state {
                mention_core::IssueState::Open => "open".green().bold().to_string(),
                mention_core::IssueState::Closed => "closed".red().bold().to_string(),
            }
        };

        let mut output = format!(
            "{} {} - {}\n  {}: {}\n  {}: {}",
            format!("#{}", self.number).cyan().bold(),
            state,
            self.title.white().bold(),
            "Author".dimmed(),
            self.user.login,
            "URL".dimmed(),
            self.html_url
        );

        if let (Some(base), Some(head)) = (&self.base, &self.head) {
            if let (Some(base_ref), Some(head_ref)) = (&base.ref_name, &head.ref_name) {
                output.push_str(&format!(
                    "\n  {}: {} <- {}",
                    "Branches".dimmed(),
                    base_ref,
                    head_ref
                ));
            }
        }

        if let Some(created) = &self.created_at {
            output.push_str(&format!(
                "\n  {}: {}",
                "Created".dimmed(),
                created.format("%Y-%m-%d %H:%M").to_string().dimmed()
            ));
        }

        output
    }
}

impl Displayable for IssueResource {
    fn display(&self) -> String {
        let state = match self.state {
            mention_core::IssueState::Open => "open".green().bold().to_string(),
            mention_core::IssueState::Closed => "closed".red().bold().to_string(),
        };

        let mut output = format!(
            "{} {} - {}\n  {}: {}\n  {}: {}\n  {}: {}",
            format!("#{}", self.number).cyan().bold(),
            state,
            self.title.white().bold(),
            "Author".dimmed(),
            self.user.login,
            "Comments".dimmed(),
            self.comments,
            "URL".dimmed(),
            self.html_url
        );

        if let Some(labels) = &self.labels {
            if !labels.is_empty() {
                let names: Vec<String> = labels.iter().map(|l| l.name.magenta().to_string()).collect();
                output.push_str(&format!("\n  {}: {}", "Labels".dimmed(), names.join(", ")));
            }
        }

        output
    }
}

impl Displayable for UserResource {
    fn display(&self) -> String {
        let mut output = self.login.cyan().bold().to_string();
        if let Some(name) = &self.name {
            output.push_str(&format!(" ({})", name.white().bold()));
        }
        output.push_str(&format!(
            "\n  {}: {} followers, {} following",
            "Social".dimmed(),
            self.followers,
            self.following
        ));
        if let Some(bio) = &self.bio {
            output.push_str(&format!("\n  {}: {}", "Bio".dimmed(), bio));
        }
        if let Some(location) = &self.location {
            output.push_str(&format!("\n  {}: {}", "Location".dimmed(), location));
        }
        output.push_str(&format!("\n  {}: {}", "URL".dimmed(), self.html_url));
        output
    }
}

impl Displayable for RepoResource {
    fn display(&self) -> String {
        let mut output = self.full_name.cyan().bold().to_string();
        if let Some(desc) = &self.description {
            output.push_str(&format!("\n  {}", desc));
        }
        output.push_str(&format!(
            "\n  {}: {}  {}: {}  {}: {}",
            "Stars".dimmed(),
            self.stargazers_count,
            "Forks".dimmed(),
            self.forks_count,
            "Issues".dimmed(),
            self.open_issues_count
        ));
        if let Some(Some(language)) = &self.language {
            output.push_str(&format!("\n  {}: {}", "Language".dimmed(), language));
        }
        output.push_str(&format!("\n  {}: {}", "URL".dimmed(), self.html_url));
        output
    }
}
