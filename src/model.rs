//! Financial record types.

use chrono::NaiveDate;
use plotters::style::RGBColor;
use std::ops::{Index, IndexMut};

/// One row of financial data for a given date.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub revenue: f64,
    pub cost: f64,
    pub marketing_spend: f64,
    pub employee_salary: f64,
    pub operational_expense: f64,
    pub profit: f64,
}

impl Record {
    /// Amount spent on a single expense category.
    pub fn expense(&self, cat: Category) -> f64 {
        match cat {
            Category::Cost => self.cost,
            Category::MarketingSpend => self.marketing_spend,
            Category::EmployeeSalary => self.employee_salary,
            Category::OperationalExpense => self.operational_expense,
        }
    }

    /// Sum of the four expense categories.
    pub fn total_expense(&self) -> f64 {
        Category::ALL.iter().map(|&cat| self.expense(cat)).sum()
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::Expense(cat) => self.expense(cat),
            Metric::Profit => self.profit,
        }
    }
}

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Cost,
    MarketingSpend,
    EmployeeSalary,
    OperationalExpense,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Cost,
        Category::MarketingSpend,
        Category::EmployeeSalary,
        Category::OperationalExpense,
    ];

    fn idx(self) -> usize {
        self as usize
    }

    /// CSV column name.
    pub fn column(self) -> &'static str {
        match self {
            Category::Cost => "Cost",
            Category::MarketingSpend => "Marketing_Spend",
            Category::EmployeeSalary => "Employee_Salary",
            Category::OperationalExpense => "Operational_Expense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Cost => "Cost",
            Category::MarketingSpend => "Marketing Spend",
            Category::EmployeeSalary => "Employee Salary",
            Category::OperationalExpense => "Operational Expense",
        }
    }

    /// Name of the derived ratio column.
    pub fn ratio_column(self) -> &'static str {
        match self {
            Category::Cost => "Cost_Expense_Ratio",
            Category::MarketingSpend => "Marketing_Spend_Ratio",
            Category::EmployeeSalary => "Employee_Salary_Ratio",
            Category::OperationalExpense => "Operational_Expense_Ratio",
        }
    }

    /// Label used in the summary file.
    pub fn ratio_label(self) -> &'static str {
        match self {
            Category::Cost => "Cost Expense Ratio",
            Category::MarketingSpend => "Marketing Spend Ratio",
            Category::EmployeeSalary => "Employee Salary Ratio",
            Category::OperationalExpense => "Operational Expense Ratio",
        }
    }

    /// Fixed chart color: salmon, light blue, light green, yellow.
    pub fn color(self) -> RGBColor {
        match self {
            Category::Cost => RGBColor(250, 128, 114),
            Category::MarketingSpend => RGBColor(173, 216, 230),
            Category::EmployeeSalary => RGBColor(144, 238, 144),
            Category::OperationalExpense => RGBColor(255, 255, 0),
        }
    }
}

/// One value per expense category.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PerCategory(pub [f64; 4]);

impl PerCategory {
    pub fn from_fn<F: FnMut(Category) -> f64>(mut f: F) -> Self {
        Self(Category::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(|&cat| (cat, self[cat]))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Index<Category> for PerCategory {
    type Output = f64;

    fn index(&self, cat: Category) -> &f64 {
        &self.0[cat.idx()]
    }
}

impl IndexMut<Category> for PerCategory {
    fn index_mut(&mut self, cat: Category) -> &mut f64 {
        &mut self.0[cat.idx()]
    }
}

/// Monetary column of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Revenue,
    Expense(Category),
    Profit,
}

impl Metric {
    /// All monetary columns, in CSV order.
    pub const ALL: [Metric; 6] = [
        Metric::Revenue,
        Metric::Expense(Category::Cost),
        Metric::Expense(Category::MarketingSpend),
        Metric::Expense(Category::EmployeeSalary),
        Metric::Expense(Category::OperationalExpense),
        Metric::Profit,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::Expense(cat) => cat.column(),
            Metric::Profit => "Profit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::Expense(cat) => cat.label(),
            Metric::Profit => "Profit",
        }
    }
}
