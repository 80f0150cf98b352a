mod cli;

use std::{
    error::Error,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::anyhow;
use billed::{
    api::{Authenticator, HttpStore},
    bills::{Bills, BillsView},
    config,
    model::{Email, UserType},
    new_bill::{FormError, NewBill},
    routes::{OnNavigate, Route},
    session::{self, Session, JWT_KEY},
    store::Store,
    ui,
};
use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Sign in and remember the session")]
    #[command(long_about = None)]
    Login(LoginArgs),

    #[command(about = "List my bills")]
    #[command(long_about = None)]
    Bills(ConfigArgs),

    #[command(about = "Show the receipt of a bill")]
    #[command(long_about = None)]
    Preview(PreviewArgs),

    #[command(about = "Fill and submit a new bill")]
    #[command(long_about = None)]
    New(ConfigArgs),
}

#[derive(clap::Args)]
struct ConfigArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,
}

#[derive(clap::Args)]
struct LoginArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long)]
    email: String,

    #[arg(long)]
    admin: bool,
}

#[derive(clap::Args)]
struct PreviewArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg()]
    bill_id: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Login(args) => {
            login(args).await?;
        }
        Cli::Bills(args) => {
            App::load(args.config_path)?.run(Route::Bills).await?;
        }
        Cli::Preview(args) => {
            App::load(args.config.config_path)?
                .preview(&args.bill_id)
                .await?;
        }
        Cli::New(args) => {
            App::load(args.config_path)?.open_new_bill().await?;
        }
    };

    Ok(())
}

async fn login(args: LoginArgs) -> anyhow::Result<()> {
    debug!("Подгружаем конфиг из {:?}", args.config.config_path);
    let cfg = config::load(args.config.config_path)?;

    debug!("Подгружаем хранилище из {:?}", cfg.storage_path);
    let mut storage = session::load(&cfg.storage_path)?;

    let email = Email::new(&args.email)?;
    let password = inquire::Password::new("Mot de passe")
        .without_confirmation()
        .prompt()?;

    let jwt = Authenticator::new(&cfg.api_url)?
        .login(email.as_str(), &password)
        .await?;

    let session = Session {
        user_type: if args.admin {
            UserType::Admin
        } else {
            UserType::Employee
        },
        email: Some(email),
    };
    session.store(&mut storage)?;
    storage.set_item(JWT_KEY, jwt);

    debug!("Сохраняем хранилище в {:?}", cfg.storage_path);
    session::save(&storage, &cfg.storage_path)?;

    println!("Connecté");

    Ok(())
}

/// Связывает страницы с хранилищем и сессией и переключает их по запросу.
struct App {
    store: Arc<dyn Store>,
    session: Session,
    next: Arc<Mutex<Option<Route>>>,
}

impl App {
    fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        debug!("Подгружаем конфиг из {:?}", config_path);
        let cfg = config::load(config_path)?;

        debug!("Подгружаем хранилище из {:?}", cfg.storage_path);
        let storage = session::load(&cfg.storage_path)?;

        let session = Session::from_storage(&storage)?
            .ok_or(anyhow!("no session found, run login first"))?;
        let jwt = storage.get_item(JWT_KEY).map(str::to_owned);

        Ok(Self {
            store: Arc::new(HttpStore::new(&cfg.api_url, jwt)?),
            session,
            next: Arc::new(Mutex::new(None)),
        })
    }

    fn on_navigate(&self) -> OnNavigate {
        let next = self.next.clone();

        Box::new(move |route| {
            debug!("Переходим на {}", route);
            if let Ok(mut n) = next.lock() {
                *n = Some(route);
            }
        })
    }

    fn take_next(&self) -> Option<Route> {
        self.next.lock().ok().and_then(|mut n| n.take())
    }

    fn bills_page(&self) -> Bills {
        Bills::new(self.store.clone(), self.on_navigate(), Box::new(ui::TerminalModal))
    }

    async fn run(&self, start: Route) -> anyhow::Result<()> {
        let mut route = Some(start);

        while let Some(current) = route {
            match current {
                Route::Bills => self.show_bills().await,
                Route::NewBill => self.fill_new_bill().await?,
            }
            route = self.take_next();
        }

        Ok(())
    }

    async fn show_bills(&self) {
        let view = self.bills_page().fetch_and_render().await;

        println!("{}", ui::render_bills(&view));
    }

    async fn open_new_bill(&self) -> anyhow::Result<()> {
        self.bills_page().handle_click_new_bill();

        match self.take_next() {
            Some(route) => self.run(route).await,
            None => Ok(()),
        }
    }

    async fn preview(&self, bill_id: &str) -> anyhow::Result<()> {
        let page = self.bills_page();

        let rows = match page.fetch_and_render().await {
            BillsView::Table { rows } => rows,
            view => {
                println!("{}", ui::render_bills(&view));
                return Ok(());
            }
        };

        let row = rows
            .iter()
            .find(|r| r.id == bill_id)
            .ok_or(anyhow!("bill {} not found", bill_id))?;
        let url = row
            .file_url
            .as_deref()
            .ok_or(anyhow!("bill {} has no receipt", bill_id))?;

        page.handle_click_icon_eye(url);

        Ok(())
    }

    async fn fill_new_bill(&self) -> anyhow::Result<()> {
        let mut form = NewBill::new(self.store.clone(), self.session.clone(), self.on_navigate());

        loop {
            let files = cli::ask_receipt()?;

            match form.handle_change_file(files).await {
                Ok(()) if form.draft().file_url.is_some() => break,
                Ok(()) => {}
                Err(FormError::InvalidFormat) => eprintln!("{}", ui::render_form_errors(&form)),
                Err(e) => {
                    eprintln!("{:#}", anyhow::Error::from(e));
                    if !cli::confirm_retry()? {
                        return Ok(());
                    }
                }
            }
        }

        let mut values = cli::ask_values(None)?;

        loop {
            match form.handle_submit(&values).await {
                Ok(()) => return Ok(()),
                Err(FormError::InvalidField { .. }) => {
                    eprintln!("{}", ui::render_form_errors(&form));
                    values = cli::ask_values(Some(&values))?;
                }
                Err(e) => {
                    eprintln!("{:#}", anyhow::Error::from(e));
                    if !cli::confirm_retry()? {
                        return Ok(());
                    }
                }
            }
        }
    }
}
