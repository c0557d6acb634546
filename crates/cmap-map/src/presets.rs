//! Ready-made caption lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Captions offered as one-click additions.
pub const QUICK_CAPTIONS: &[&str] = &["Name", "Email", "Phone", "Address", "Date", "Amount"];

/// A named caption list matched to a kind of dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionPreset {
    #[default]
    General,
    Customers,
    Products,
    Sales,
    Employees,
}

impl CaptionPreset {
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Customers,
        Self::Products,
        Self::Sales,
        Self::Employees,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Sales => "sales",
            Self::Employees => "employees",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    pub const fn captions(self) -> &'static [&'static str] {
        match self {
            Self::General => &[
                "Name", "Email", "Phone", "Address", "Date", "Amount", "ID", "Category",
            ],
            Self::Customers => &[
                "Customer Name",
                "Email Address",
                "Phone Number",
                "Address",
                "Registration Date",
                "Order Count",
            ],
            Self::Products => &["Product Name", "Category", "Price", "Stock Level", "Supplier"],
            Self::Sales => &["Customer", "Product", "Amount", "Date", "Sales Representative"],
            Self::Employees => &["Employee Name", "Department", "Hire Date", "Salary", "Manager"],
        }
    }

    /// Picks a preset from keywords in the column names.
    ///
    /// Checked in order: customer/client, product/item, sale/transaction,
    /// employee/staff. Falls back to [`CaptionPreset::General`].
    pub fn detect<S: AsRef<str>>(column_names: &[S]) -> Self {
        let text = column_names
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["customer", "client"]) {
            Self::Customers
        } else if has(&["product", "item"]) {
            Self::Products
        } else if has(&["sale", "transaction"]) {
            Self::Sales
        } else if has(&["employee", "staff"]) {
            Self::Employees
        } else {
            Self::General
        }
    }
}

impl fmt::Display for CaptionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(CaptionPreset::detect(&["client_ref", "total"]), CaptionPreset::Customers);
        assert_eq!(CaptionPreset::detect(&["item_name"]), CaptionPreset::Products);
        assert_eq!(CaptionPreset::detect(&["Sale_Date"]), CaptionPreset::Sales);
        assert_eq!(CaptionPreset::detect(&["staff_no"]), CaptionPreset::Employees);
        assert_eq!(CaptionPreset::detect(&["a", "b"]), CaptionPreset::General);
        assert_eq!(CaptionPreset::detect::<&str>(&[]), CaptionPreset::General);
    }

    #[test]
    fn test_detect_order() {
        // Sales data names a customer column, so customers wins.
        let columns = ["transaction_id", "customer_name", "product_sold"];
        assert_eq!(CaptionPreset::detect(&columns), CaptionPreset::Customers);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(CaptionPreset::from_name("Employees"), Some(CaptionPreset::Employees));
        assert_eq!(CaptionPreset::from_name("orders"), None);
        assert_eq!(CaptionPreset::General.captions().len(), 8);
        assert!(QUICK_CAPTIONS.iter().all(|c| CaptionPreset::General.captions().contains(c)));
    }
}
