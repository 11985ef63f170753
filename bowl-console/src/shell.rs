//! Interactive shell
//!
//! One process keeps one cookie jar, so a login lasts until `logout` or
//! until the server expires it. The current page decides which commands
//! are available.

use std::sync::Arc;

use bowl_client::controllers::{
    CustomerDashboard, CustomerOrders, EmployeeOrders, LandingController, LoginOutcome,
    ManagerDashboard, ManagerTab, StatusChange,
};
use bowl_client::forms::{
    EmployeeForm, EmployeeUpdateForm, LoginForm, MenuItemForm, RegistrationForm,
};
use bowl_client::view::baht;
use bowl_client::{
    ClientConfig, ClientError, ClientResult, Confirm, NetworkHttpClient, Notifier, Redirect, Role,
    SessionCache, SessionContext,
};
use chrono::Datelike;
use clap::Parser;
use tokio::io::AsyncWriteExt;

use crate::commands::{Command, Line, LoginKind, ReportKind, TabArg, Toggle, split_words};
use crate::prompt::StdinInput;

const CHART_WIDTH: usize = 40;

type Http = NetworkHttpClient;

enum Page {
    Landing,
    Customer {
        dashboard: CustomerDashboard<Http>,
        history: CustomerOrders<Http>,
    },
    Employee(EmployeeOrders<Http>),
    Manager(ManagerDashboard<Http>),
}

impl Page {
    fn role(&self) -> Option<Role> {
        match self {
            Page::Landing => None,
            Page::Customer { .. } => Some(Role::Customer),
            Page::Employee(_) => Some(Role::Employee),
            Page::Manager(_) => Some(Role::Manager),
        }
    }

    fn prompt(&self) -> &'static str {
        match self {
            Page::Landing => "bowl> ",
            Page::Customer { .. } => "bowl:customer> ",
            Page::Employee(_) => "bowl:orders> ",
            Page::Manager(_) => "bowl:manager> ",
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    config: ClientConfig,
    http: Http,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    input: StdinInput,
    cache: SessionCache,
    page: Page,
}

fn wrong_page(role: Role) -> ClientError {
    ClientError::Session(format!("log in as {role} to use this command"))
}

impl Shell {
    pub fn new(
        config: ClientConfig,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        input: StdinInput,
    ) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(&config)?;
        let cache = SessionCache::new(config.session_cache_path());
        Ok(Self {
            config,
            http,
            notifier,
            confirm,
            input,
            cache,
            page: Page::Landing,
        })
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.greet().await;

        let mut stdout = tokio::io::stdout();
        loop {
            stdout.write_all(self.page.prompt().as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = self.input.next_line().await? else {
                break;
            };
            let words = match split_words(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
            let command = match Line::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    // help output and usage errors alike
                    println!("{e}");
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => self.report(e),
            }
        }

        self.leave().await;
        Ok(())
    }

    async fn greet(&self) {
        println!("Server: {}", self.config.base_url);
        if self.config.csrf.is_none() {
            match self.http.refresh_csrf("/").await {
                Ok(true) => tracing::debug!("CSRF token read from landing page"),
                Ok(false) => tracing::debug!("landing page carries no CSRF token"),
                Err(e) => tracing::warn!(error = %e, "could not read landing page"),
            }
        }
        if let Some(identity) = self.landing().cached_identity() {
            println!(
                "Welcome back, {}. Log in again to continue as {}.",
                identity.display_name, identity.role
            );
        }
        println!("Type `help` for commands.");
    }

    /// Controllers already toasted their own failures
    fn report(&mut self, err: ClientError) {
        match err {
            ClientError::Unauthorized => {
                let redirect = self
                    .page
                    .role()
                    .map(|r| r.login_redirect())
                    .unwrap_or(Redirect::Landing);
                self.notifier.error("Your session has expired. Please log in again.");
                self.page = Page::Landing;
                println!("→ {}", redirect.path());
            }
            ClientError::Session(msg) => self.notifier.error(&msg),
            other => tracing::debug!(error = %other, "command failed"),
        }
    }

    fn landing(&self) -> LandingController<Http> {
        LandingController::new(self.http.clone(), self.notifier.clone())
            .with_cache(self.cache.clone())
    }

    fn customer(&mut self) -> ClientResult<&mut CustomerDashboard<Http>> {
        match &mut self.page {
            Page::Customer { dashboard, .. } => Ok(dashboard),
            _ => Err(wrong_page(Role::Customer)),
        }
    }

    fn history(&mut self) -> ClientResult<&mut CustomerOrders<Http>> {
        match &mut self.page {
            Page::Customer { history, .. } => Ok(history),
            _ => Err(wrong_page(Role::Customer)),
        }
    }

    fn board(&mut self) -> ClientResult<&mut EmployeeOrders<Http>> {
        match &mut self.page {
            Page::Employee(board) => Ok(board),
            _ => Err(wrong_page(Role::Employee)),
        }
    }

    fn manager(&mut self) -> ClientResult<&mut ManagerDashboard<Http>> {
        match &mut self.page {
            Page::Manager(manager) => Ok(manager),
            _ => Err(wrong_page(Role::Manager)),
        }
    }

    async fn execute(&mut self, command: Command) -> ClientResult<Flow> {
        match command {
            // ====== Session ======
            Command::Login {
                kind,
                username,
                password,
            } => {
                self.require_logged_out()?;
                let form = LoginForm::new(&username, &password);
                let landing = self.landing();
                let outcome = match kind {
                    LoginKind::Customer => landing.login_customer(form).await?,
                    LoginKind::Employee => landing.login_employee(form).await?,
                    LoginKind::Any => landing.login(form).await?,
                };
                self.enter(outcome).await?;
            }
            Command::Register {
                username,
                password,
                name,
                email,
                phone,
            } => {
                self.require_logged_out()?;
                let form = RegistrationForm {
                    username,
                    password,
                    name,
                    email,
                    phone,
                };
                let outcome = self.landing().register_customer(form).await?;
                self.enter(outcome).await?;
            }
            Command::Logout => {
                let redirect = self.leave().await;
                println!("→ {}", redirect.path());
            }
            Command::Whoami => match self.page.role() {
                Some(role) => println!("Logged in as {role}"),
                None => println!("Not logged in"),
            },
            Command::Csrf { page } => {
                if self.http.refresh_csrf(&page).await? {
                    println!("CSRF token updated from {page}");
                } else {
                    println!("{page} carries no CSRF token");
                }
            }

            // ====== Customer ======
            Command::Menu => {
                let dashboard = self.customer()?;
                let items = dashboard.load_menu().await;
                if items.is_empty() {
                    println!("The menu is empty.");
                }
                for item in items {
                    println!(
                        "{:>4}  {:<28} {:>10}  {}",
                        item.id,
                        item.name,
                        baht(item.price),
                        item.category
                    );
                }
            }
            Command::Cart => {
                let text = self.customer()?.load_cart().await.render_text();
                println!("{text}");
            }
            Command::Add { menu_item_id } => {
                let dashboard = self.customer()?;
                if dashboard.menu().is_empty() {
                    dashboard.load_menu().await;
                }
                let cart = dashboard.add_to_cart(menu_item_id).await?;
                println!("{}", cart.render_text());
            }
            Command::Inc { line_id } => {
                let cart = self.customer()?.increment(line_id).await?;
                println!("{}", cart.render_text());
            }
            Command::Dec { line_id } => {
                let cart = self.customer()?.decrement(line_id).await?;
                println!("{}", cart.render_text());
            }
            Command::Remove { line_id } => {
                let cart = self.customer()?.remove(line_id).await?;
                println!("{}", cart.render_text());
            }
            Command::Checkout => {
                self.customer()?.place_order().await?;
            }
            Command::History => {
                let cards = self.history()?.load().await?;
                if cards.is_empty() {
                    println!("You have no orders yet.");
                }
                for card in cards {
                    println!("{}", card.render_text());
                }
            }

            // ====== Employee ======
            Command::Board { filter } => {
                let board = self.board()?;
                if let Some(filter) = filter {
                    board.set_filter(filter);
                }
                board.load_orders().await?;
                print_board(board);
            }
            Command::Stats => println!("{}", self.board()?.statistics()),
            Command::Status { order_id, status } => {
                let board = self.board()?;
                if board.order(order_id).is_none() {
                    board.load_orders().await?;
                }
                if board.update_status(order_id, status).await? == StatusChange::Applied {
                    print_board(board);
                }
            }
            Command::Bill { order_id } => {
                let bill = self.board()?.bill(order_id);
                match bill {
                    Some(bill) => println!("{bill}"),
                    None => self
                        .notifier
                        .error(&format!("Order #{order_id} is not on the board")),
                }
            }
            Command::Poll { toggle } => {
                let interval = self.config.poll_interval;
                let board = self.board()?;
                match toggle {
                    Toggle::On => {
                        board.start_polling(interval);
                        println!("Checking for new orders every {}s", interval.as_secs());
                    }
                    Toggle::Off => {
                        board.stop_polling();
                        println!("New-order checks stopped");
                    }
                }
            }
            Command::Ack => {
                let board = self.board()?;
                board.acknowledge_badge().await?;
                print_board(board);
            }

            // ====== Manager ======
            Command::Tab { tab } => {
                let tab = match tab {
                    TabArg::Menu => ManagerTab::Menu,
                    TabArg::Employees => ManagerTab::Employees,
                    TabArg::Reports => ManagerTab::Reports,
                };
                let manager = self.manager()?;
                manager.switch_tab(tab).await?;
                print_manager_tab(manager);
            }
            Command::Items => {
                let manager = self.manager()?;
                manager.load_menu_items().await?;
                print_manager_tab_menu(manager);
            }
            Command::Item { id } => {
                let item = self.manager()?.get_menu_item(id).await?;
                println!("#{} {} {} [{}]", item.id, item.name, baht(item.price), item.category);
                if let Some(description) = item.description.filter(|d| !d.is_empty()) {
                    println!("  {description}");
                }
                println!("  {}", if item.active { "active" } else { "inactive" });
            }
            Command::ItemAdd {
                name,
                price,
                category,
                description,
            } => {
                let form = MenuItemForm::new(name, price, category).with_description(description);
                let manager = self.manager()?;
                manager.create_menu_item(form).await?;
                print_manager_tab_menu(manager);
            }
            Command::ItemEdit {
                id,
                name,
                price,
                category,
                description,
                active,
            } => {
                let manager = self.manager()?;
                let current = manager.get_menu_item(id).await?;
                let mut form = MenuItemForm::from(&current);
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(price) = price {
                    form.price = price;
                }
                if let Some(category) = category {
                    form.category = category;
                }
                if let Some(description) = description {
                    form.description = description;
                }
                if let Some(active) = active {
                    form.active = active;
                }
                manager.update_menu_item(id, form).await?;
                print_manager_tab_menu(manager);
            }
            Command::ItemDel { id } => {
                let manager = self.manager()?;
                if manager.menu_items().is_empty() {
                    manager.load_menu_items().await?;
                }
                if manager.delete_menu_item(id).await? {
                    print_manager_tab_menu(manager);
                }
            }
            Command::Staff => {
                let manager = self.manager()?;
                manager.load_employees().await?;
                print_staff(manager);
            }
            Command::StaffAdd {
                name,
                position,
                username,
                password,
            } => {
                let form = EmployeeForm {
                    name,
                    position,
                    username,
                    password,
                };
                let manager = self.manager()?;
                manager.create_employee(form).await?;
                print_staff(manager);
            }
            Command::StaffEdit { id, name, position } => {
                let manager = self.manager()?;
                manager
                    .update_employee(id, EmployeeUpdateForm { name, position })
                    .await?;
                print_staff(manager);
            }
            Command::StaffDel { id } => {
                let manager = self.manager()?;
                if manager.employees().is_empty() {
                    manager.load_employees().await?;
                }
                if manager.delete_employee(id).await? {
                    print_staff(manager);
                }
            }
            Command::Report { kind, year, month } => {
                let manager = self.manager()?;
                match kind {
                    ReportKind::Sales => {
                        let report = manager.load_sales_report().await?;
                        println!("Orders today:  {}", report.order_count);
                        println!("Revenue:       {}", baht(report.revenue));
                        println!("New customers: {}", report.new_customers);
                        println!("Avg rating:    {:.1}", report.avg_rating);
                    }
                    ReportKind::Monthly => {
                        let year = year.unwrap_or_else(|| chrono::Local::now().year());
                        let chart = manager.load_monthly_report(year, month).await?;
                        println!("{}", chart.render_text(CHART_WIDTH));
                    }
                    ReportKind::Stats => {
                        let stats = manager.load_order_stats().await?;
                        println!(
                            "Pending {} | In progress {} | Completed {} | Cancelled {} | Total {}",
                            stats.pending_orders,
                            stats.in_progress_orders,
                            stats.completed_orders,
                            stats.cancelled_orders,
                            stats.total_orders
                        );
                    }
                }
            }

            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn require_logged_out(&self) -> ClientResult<()> {
        match self.page.role() {
            Some(role) => Err(ClientError::Session(format!(
                "already logged in as {role}; `logout` first"
            ))),
            None => Ok(()),
        }
    }

    /// Open the page a login redirected to
    async fn enter(&mut self, outcome: LoginOutcome) -> ClientResult<()> {
        let LoginOutcome { session, redirect } = outcome;
        println!("→ {}", redirect.path());
        self.page = self.open(&session).await?;
        Ok(())
    }

    async fn open(&self, session: &SessionContext) -> ClientResult<Page> {
        let Some(identity) = session.identity() else {
            return Ok(Page::Landing);
        };
        let page = match identity.role {
            Role::Customer => {
                let mut dashboard =
                    CustomerDashboard::new(self.http.clone(), self.notifier.clone(), session)?
                        .with_cache(self.cache.clone());
                println!("{}", dashboard.load().await);
                println!("{}", dashboard.cart().render_text());
                let history = CustomerOrders::new(self.http.clone(), self.notifier.clone(), session)?
                    .with_cache(self.cache.clone());
                Page::Customer { dashboard, history }
            }
            Role::Employee => {
                let mut board = EmployeeOrders::new(
                    self.http.clone(),
                    self.notifier.clone(),
                    self.confirm.clone(),
                    session,
                )?
                .with_cache(self.cache.clone());
                println!("{}", board.welcome_text());
                board.load_orders().await?;
                print_board(&board);
                board.start_polling(self.config.poll_interval);
                Page::Employee(board)
            }
            Role::Manager => {
                let mut manager = ManagerDashboard::new(
                    self.http.clone(),
                    self.notifier.clone(),
                    self.confirm.clone(),
                    session,
                )?
                .with_cache(self.cache.clone());
                println!("{}", manager.welcome_text());
                manager.switch_tab(ManagerTab::Menu).await?;
                print_manager_tab(&manager);
                Page::Manager(manager)
            }
        };
        Ok(page)
    }

    /// Log out of whatever page is open
    async fn leave(&mut self) -> Redirect {
        match std::mem::replace(&mut self.page, Page::Landing) {
            Page::Landing => Redirect::Landing,
            Page::Customer { dashboard, history } => {
                drop(history);
                dashboard.logout().await
            }
            Page::Employee(board) => board.logout().await,
            Page::Manager(manager) => manager.logout().await,
        }
    }
}

fn print_board(board: &EmployeeOrders<Http>) {
    println!("{}", board.statistics());
    let cards = board.cards();
    if cards.is_empty() {
        println!("No orders.");
    }
    for card in cards {
        println!("{}", card.render_text());
    }
}

fn print_manager_tab(manager: &ManagerDashboard<Http>) {
    match manager.tab() {
        ManagerTab::Menu => print_manager_tab_menu(manager),
        ManagerTab::Employees => print_staff(manager),
        ManagerTab::Reports => {
            if let Some(report) = manager.sales_report() {
                println!(
                    "Today: {} orders, {} revenue",
                    report.order_count,
                    baht(report.revenue)
                );
            }
            if let Some(stats) = manager.order_stats() {
                println!(
                    "Pending {} | In progress {} | Completed {} | Cancelled {}",
                    stats.pending_orders,
                    stats.in_progress_orders,
                    stats.completed_orders,
                    stats.cancelled_orders
                );
            }
        }
    }
}

fn print_manager_tab_menu(manager: &ManagerDashboard<Http>) {
    for item in manager.menu_items() {
        println!(
            "{:>4}  {:<28} {:>10}  {:<10} {}",
            item.id,
            item.name,
            baht(item.price),
            item.category,
            if item.active { "" } else { "(inactive)" }
        );
    }
}

fn print_staff(manager: &ManagerDashboard<Http>) {
    for employee in manager.employees() {
        println!(
            "{:>4}  {:<24} {:<18} {}",
            employee.id,
            employee.name,
            employee.position,
            employee.username.as_deref().unwrap_or("-")
        );
    }
}
