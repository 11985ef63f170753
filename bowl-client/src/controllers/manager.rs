// bowl-client/src/controllers/manager.rs
// Manager dashboard - menu and staff administration, reports

use std::sync::Arc;

use serde::de::IgnoredAny;
use shared::models::{Employee, EmployeeCreated, MenuItem, OrderStats, ReportSummary, SalesReport};
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::forms::{EmployeeForm, EmployeeUpdateForm, MenuItemForm};
use crate::http::HttpClient;
use crate::notify::{Confirm, Notifier};
use crate::session::{Identity, Redirect, Role, SessionCache, SessionContext};
use crate::view::MonthlyChart;

const MENU_ITEMS_PATH: &str = "/api/manager/menu-items";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManagerTab {
    #[default]
    Menu,
    Employees,
    Reports,
}

impl ManagerTab {
    pub fn title(&self) -> &'static str {
        match self {
            ManagerTab::Menu => "Menu",
            ManagerTab::Employees => "Employees",
            ManagerTab::Reports => "Reports",
        }
    }
}

pub struct ManagerDashboard<H> {
    http: H,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    manager: Identity,
    cache: Option<SessionCache>,
    tab: ManagerTab,
    menu_items: Vec<MenuItem>,
    employees: Vec<Employee>,
    sales: Option<SalesReport>,
    monthly: Option<MonthlyChart>,
    stats: Option<OrderStats>,
}

impl<H: HttpClient> ManagerDashboard<H> {
    pub fn new(
        http: H,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        session: &SessionContext,
    ) -> ClientResult<Self> {
        let manager = session.require(Role::Manager)?.clone();
        Ok(Self {
            http,
            notifier,
            confirm,
            manager,
            cache: None,
            tab: ManagerTab::Menu,
            menu_items: Vec::new(),
            employees: Vec::new(),
            sales: None,
            monthly: None,
            stats: None,
        })
    }

    pub fn with_cache(mut self, cache: SessionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn welcome_text(&self) -> String {
        format!("Hello, {}", self.manager.display_name)
    }

    pub fn tab(&self) -> ManagerTab {
        self.tab
    }

    /// Switch tab and load its data
    pub async fn switch_tab(&mut self, tab: ManagerTab) -> ClientResult<()> {
        self.tab = tab;
        tracing::debug!(tab = tab.title(), "tab switched");
        match tab {
            ManagerTab::Menu => self.load_menu_items().await.map(|_| ()),
            ManagerTab::Employees => self.load_employees().await.map(|_| ()),
            ManagerTab::Reports => {
                self.load_sales_report().await?;
                self.load_order_stats().await.map(|_| ())
            }
        }
    }

    fn check<F: Validate>(&self, form: &F) -> ClientResult<()> {
        form.validate().map_err(|errors| {
            let err = ClientError::from(errors);
            tracing::warn!(error = %err, "form rejected");
            self.notifier.error(&err.user_message());
            err
        })
    }

    // ==================== Menu ====================

    pub async fn load_menu_items(&mut self) -> ClientResult<&[MenuItem]> {
        self.menu_items = self
            .http
            .get(MENU_ITEMS_PATH)
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load menu", e))?;
        Ok(&self.menu_items)
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub async fn get_menu_item(&self, id: i64) -> ClientResult<MenuItem> {
        self.http
            .get(&format!("{MENU_ITEMS_PATH}/{id}"))
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load menu item", e))
    }

    pub async fn create_menu_item(&mut self, form: MenuItemForm) -> ClientResult<()> {
        self.check(&form)?;
        self.http
            .post::<IgnoredAny, _>(MENU_ITEMS_PATH, &form)
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not add menu item", e))?;
        tracing::info!(name = %form.name, "menu item created");
        self.notifier.success(&format!("\"{}\" added to the menu", form.name));
        self.load_menu_items().await?;
        Ok(())
    }

    pub async fn update_menu_item(&mut self, id: i64, form: MenuItemForm) -> ClientResult<()> {
        self.check(&form)?;
        self.http
            .put::<IgnoredAny, _>(&format!("{MENU_ITEMS_PATH}/{id}"), &form)
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not update menu item", e))?;
        tracing::info!(id, "menu item updated");
        self.notifier.success(&format!("\"{}\" updated", form.name));
        self.load_menu_items().await?;
        Ok(())
    }

    /// Returns `false` when the prompt was declined
    pub async fn delete_menu_item(&mut self, id: i64) -> ClientResult<bool> {
        let name = self
            .menu_items
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| format!("#{id}"));
        if !self.confirm.confirm(&format!("Delete menu item \"{name}\"?")).await {
            return Ok(false);
        }
        self.http
            .delete::<IgnoredAny>(&format!("{MENU_ITEMS_PATH}/{id}"))
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not delete menu item", e))?;
        tracing::info!(id, "menu item deleted");
        self.notifier.success(&format!("\"{name}\" deleted"));
        self.load_menu_items().await?;
        Ok(true)
    }

    // ==================== Employees ====================

    pub async fn load_employees(&mut self) -> ClientResult<&[Employee]> {
        self.employees = self
            .http
            .get("/api/employees")
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load employees", e))?;
        Ok(&self.employees)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub async fn create_employee(&mut self, form: EmployeeForm) -> ClientResult<EmployeeCreated> {
        self.check(&form)?;
        let created: EmployeeCreated = self
            .http
            .post("/api/managers/employees", &form)
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not register employee", e))?;
        tracing::info!(employee_id = created.employee_id, "employee registered");
        self.notifier.success(&format!(
            "{} registered as {} (username: {})",
            created.name, created.position, created.username
        ));
        self.load_employees().await?;
        Ok(created)
    }

    pub async fn update_employee(&mut self, id: i64, form: EmployeeUpdateForm) -> ClientResult<()> {
        self.check(&form)?;
        self.http
            .put::<IgnoredAny, _>(&format!("/api/employees/{id}"), &form)
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not update employee", e))?;
        tracing::info!(id, "employee updated");
        self.notifier.success(&format!("{} updated", form.name));
        self.load_employees().await?;
        Ok(())
    }

    /// Returns `false` when the prompt was declined
    pub async fn delete_employee(&mut self, id: i64) -> ClientResult<bool> {
        let name = self
            .employees
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("#{id}"));
        if !self.confirm.confirm(&format!("Remove employee {name}?")).await {
            return Ok(false);
        }
        self.http
            .delete::<IgnoredAny>(&format!("/api/employees/{id}"))
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not remove employee", e))?;
        tracing::info!(id, "employee removed");
        self.notifier.success(&format!("{name} removed"));
        self.load_employees().await?;
        Ok(true)
    }

    // ==================== Reports ====================

    pub async fn load_sales_report(&mut self) -> ClientResult<&SalesReport> {
        let report: SalesReport = self
            .http
            .get("/api/reports/sales")
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load sales report", e))?;
        Ok(&*self.sales.insert(report))
    }

    /// Monthly revenue; `month` narrows the summary figures to one month
    pub async fn load_monthly_report(&mut self, year: i32, month: Option<u32>) -> ClientResult<&MonthlyChart> {
        let mut path = format!("/api/reports/monthly?year={year}");
        if let Some(month) = month {
            path.push_str(&format!("&month={month}"));
        }
        let summary: ReportSummary = self
            .http
            .get(&path)
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load monthly report", e))?;
        Ok(&*self.monthly.insert(MonthlyChart::from_summary(year, &summary)))
    }

    pub async fn load_order_stats(&mut self) -> ClientResult<&OrderStats> {
        let stats: OrderStats = self
            .http
            .get("/api/managers/order-stats")
            .await
            .map_err(|e| super::fail(self.notifier.as_ref(), "Could not load order statistics", e))?;
        Ok(&*self.stats.insert(stats))
    }

    pub fn sales_report(&self) -> Option<&SalesReport> {
        self.sales.as_ref()
    }

    pub fn monthly_chart(&self) -> Option<&MonthlyChart> {
        self.monthly.as_ref()
    }

    pub fn order_stats(&self) -> Option<&OrderStats> {
        self.stats.as_ref()
    }

    pub async fn logout(self) -> Redirect {
        super::server_logout(&self.http, self.cache.as_ref()).await;
        Redirect::Landing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_titles() {
        assert_eq!(ManagerTab::default(), ManagerTab::Menu);
        assert_eq!(ManagerTab::Reports.title(), "Reports");
    }
}
