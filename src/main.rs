use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::Value;

use discover_query::client::{ApiClient, HttpClient, PageLinks};
use discover_query::config::Config;
use discover_query::logging::init_tracing;
use discover_query::query::{QueryCoordinator, QueryHooks, QueryProps, RenderProps};
use discover_query::view::{EventView, Location, TimeRange};

#[derive(Debug, Parser)]
#[command(name = "discover-query", about = "Run an events query and print each page")]
struct Cli {
    /// Config file (default: ~/.config/discover-query/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Organization slug
    #[arg(long)]
    org: Option<String>,

    /// Endpoint segment after the organization
    #[arg(long)]
    route: Option<String>,

    /// Column to select; repeatable
    #[arg(long = "field", short = 'f', required = true)]
    fields: Vec<String>,

    /// Search filter
    #[arg(long, short = 'q', default_value = "")]
    query: String,

    #[arg(long)]
    sort: Option<String>,

    /// Project id; repeatable
    #[arg(long = "project")]
    projects: Vec<u64>,

    /// Environment; repeatable
    #[arg(long = "environment")]
    environments: Vec<String>,

    /// Relative period such as 24h or 14d
    #[arg(long, default_value = "24h", conflicts_with_all = ["start", "end"])]
    period: String,

    #[arg(long, requires = "end")]
    start: Option<String>,

    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Page location whose query string may override time range and cursor
    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    limit: Option<u32>,

    #[arg(long)]
    cursor: Option<String>,

    #[arg(long)]
    referrer: Option<String>,

    #[arg(long)]
    no_pagination: bool,

    /// Number of pages to follow through the Link header
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .context("loading configuration")?;

        if let Some(org) = &self.org {
            config.api.organization = org.clone();
        }
        if let Some(route) = &self.route {
            config.query.route = route.clone();
        }
        if self.limit.is_some() {
            config.query.limit = self.limit;
        }
        if self.referrer.is_some() {
            config.query.referrer = self.referrer.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn view(&self) -> EventView {
        let time_range = match (&self.start, &self.end) {
            (Some(start), Some(end)) => TimeRange::Absolute {
                start: start.clone(),
                end: end.clone(),
            },
            _ => TimeRange::Relative(self.period.clone()),
        };
        EventView {
            name: None,
            fields: self.fields.clone(),
            query: self.query.clone(),
            sort: self.sort.clone(),
            projects: self.projects.clone(),
            environments: self.environments.clone(),
            time_range,
        }
    }

    fn props(&self, config: &Config) -> QueryProps {
        let mut props = QueryProps::new(self.view(), &config.api.organization, &config.query.route);
        if let Some(location) = &self.location {
            props = props.with_location(Location::parse(location));
        }
        if let Some(limit) = config.query.limit {
            props = props.with_limit(limit);
        }
        if let Some(cursor) = &self.cursor {
            props = props.with_cursor(cursor.clone());
        }
        if let Some(referrer) = &config.query.referrer {
            props = props.with_referrer(referrer.clone());
        }
        if self.no_pagination {
            props = props.without_pagination();
        }
        props
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let client: Arc<dyn ApiClient> = Arc::new(HttpClient::new(&config.api)?);

    let hooks = QueryHooks::<Value>::new()
        .before_fetch(|client| client.clear())
        .set_error(|message| {
            if let Some(message) = message {
                tracing::error!(error = message, "Query failed");
            }
        });
    let coordinator = QueryCoordinator::<Value>::new(client, &config.api.base_path)
        .with_hooks(hooks)
        .on_render(|props: &RenderProps<Value>| {
            tracing::debug!(
                loading = props.is_loading,
                error = props.error.as_deref().unwrap_or(""),
                page_info = props.page_info.as_deref().unwrap_or(""),
                "Render"
            );
        });

    let mut props = cli.props(&config);
    let mut pending = coordinator.mount(props.clone());

    for page in 1..=cli.pages {
        let Some(handle) = pending.take() else {
            bail!("Query was not started: the view has no usable fields");
        };
        handle.await.context("query task panicked")?;

        let rendered = coordinator.render_props();
        if let Some(error) = rendered.error {
            coordinator.dispose();
            bail!(error);
        }
        if let Some(data) = &rendered.data {
            println!("{}", serde_json::to_string_pretty(data)?);
        }

        if page == cli.pages {
            break;
        }
        let next = rendered
            .page_info
            .as_deref()
            .map(PageLinks::parse)
            .and_then(|links| links.next_cursor().map(str::to_string));
        let Some(next) = next else {
            break;
        };

        props = props.with_cursor(next);
        pending = coordinator.update(props.clone());
    }

    coordinator.dispose();
    Ok(())
}
