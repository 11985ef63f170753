//! Shell command grammar
//!
//! Each input line is split into words and parsed with clap, so every
//! command gets the same `--help` and error reporting as the binary.

use bowl_client::OrderStatus;
use bowl_client::view::OrderFilter;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "bowl", no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoginKind {
    /// `POST /api/customers/login`
    Customer,
    /// `POST /api/employees/login`
    Employee,
    /// `POST /api/auth/login`, redirect by returned role
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Menu,
    Employees,
    Reports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Sales,
    Monthly,
    Stats,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    // ====== Session ======
    /// Log in
    Login {
        #[arg(long = "as", value_enum, default_value_t = LoginKind::Customer)]
        kind: LoginKind,
        username: String,
        password: String,
    },
    /// Create a customer account and log in
    Register {
        username: String,
        password: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    Logout,
    /// Show who is logged in
    Whoami,
    /// Read the CSRF token from a server page
    Csrf {
        #[arg(default_value = "/")]
        page: String,
    },

    // ====== Customer ======
    /// List the menu
    Menu,
    /// Show the cart
    Cart,
    /// Add one of a menu item to the cart
    Add { menu_item_id: i64 },
    /// Increase a cart line by one
    Inc { line_id: i64 },
    /// Decrease a cart line by one
    Dec { line_id: i64 },
    /// Remove a cart line
    Remove { line_id: i64 },
    /// Place an order from the cart
    Checkout,
    /// Your orders, newest first
    History,

    // ====== Employee ======
    /// Show the order board
    Board {
        /// `all` or a status, e.g. `pending`, `in_progress`
        #[arg(long)]
        filter: Option<OrderFilter>,
    },
    /// Order counts per status
    Stats,
    /// Move an order to a new status
    Status { order_id: i64, status: OrderStatus },
    /// Print the bill of an order
    Bill { order_id: i64 },
    /// Start or stop the new-order poller
    Poll {
        #[arg(value_enum)]
        toggle: Toggle,
    },
    /// Clear the new-order badge and reload
    Ack,

    // ====== Manager ======
    /// Switch dashboard tab
    Tab {
        #[arg(value_enum)]
        tab: TabArg,
    },
    /// List all menu items
    Items,
    /// Show one menu item
    Item { id: i64 },
    /// Add a menu item
    ItemAdd {
        name: String,
        price: Decimal,
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change a menu item; omitted fields keep their value
    ItemEdit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a menu item
    ItemDel { id: i64 },
    /// List employees
    Staff,
    /// Register an employee
    StaffAdd {
        name: String,
        position: String,
        username: String,
        password: String,
    },
    /// Change an employee's name and position
    StaffEdit { id: i64, name: String, position: String },
    /// Remove an employee
    StaffDel { id: i64 },
    /// Sales, monthly or order statistics report
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },

    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

/// Split a line into words with POSIX shell quoting rules
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    shell_words::split(line).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Line::try_parse_from(split_words(line).unwrap()).unwrap().command
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  add  3 ").unwrap(), vec!["add", "3"]);
        assert_eq!(
            split_words(r#"item-add "Khao Soi" 75.5 Noodles"#).unwrap(),
            vec!["item-add", "Khao Soi", "75.5", "Noodles"]
        );
        assert_eq!(split_words("name 'it''s'").unwrap(), vec!["name", "its"]);
        assert_eq!(split_words(r"a\ b").unwrap(), vec!["a b"]);
        assert_eq!(split_words(r#"x """#).unwrap(), vec!["x", ""]);
        assert!(split_words("\"open").is_err());
    }

    #[test]
    fn test_login_defaults_to_customer() {
        assert_eq!(
            parse("login nok secret1"),
            Command::Login {
                kind: LoginKind::Customer,
                username: "nok".into(),
                password: "secret1".into(),
            }
        );
        assert!(matches!(
            parse("login --as employee somsak secret1"),
            Command::Login { kind: LoginKind::Employee, .. }
        ));
    }

    #[test]
    fn test_status_accepts_wire_and_enum_names() {
        assert_eq!(
            parse(r#"status 12 "In Progress""#),
            Command::Status { order_id: 12, status: OrderStatus::InProgress }
        );
        assert_eq!(
            parse("status 12 finish"),
            Command::Status { order_id: 12, status: OrderStatus::Finish }
        );
    }

    #[test]
    fn test_board_filter() {
        assert_eq!(
            parse("board --filter pending"),
            Command::Board { filter: Some(OrderFilter::Status(OrderStatus::Pending)) }
        );
        assert_eq!(parse("board --filter all"), Command::Board { filter: Some(OrderFilter::All) });
    }

    #[test]
    fn test_item_edit_optional_fields() {
        match parse("item-edit 4 --price 80 --active false") {
            Command::ItemEdit { id, name, price, active, .. } => {
                assert_eq!(id, 4);
                assert!(name.is_none());
                assert_eq!(price, Some(Decimal::from(80)));
                assert_eq!(active, Some(false));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_exit_alias_and_errors() {
        assert_eq!(parse("exit"), Command::Quit);
        assert!(Line::try_parse_from(["inc", "abc"]).is_err());
        assert!(Line::try_parse_from(["dance"]).is_err());
    }
}
