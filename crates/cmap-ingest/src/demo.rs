//! Built-in sample datasets for trying the mapper without a file.

use std::fmt;

use cmap_model::Grid;
use serde::{Deserialize, Serialize};

#[rustfmt::skip]
const CUSTOMERS: &[&[&str]] = &[
    &["customer_id", "full_name", "email_address", "phone_number", "street_address", "registration_date", "total_orders"],
    &["1001", "John Smith", "john.smith@email.com", "(555) 123-4567", "123 Main St, Anytown, ST 12345", "2023-01-15", "5"],
    &["1002", "Sarah Johnson", "sarah.j@gmail.com", "(555) 234-5678", "456 Oak Ave, Springfield, ST 67890", "2023-02-20", "12"],
    &["1003", "Michael Brown", "m.brown@company.org", "(555) 345-6789", "789 Pine Rd, Riverside, ST 11111", "2023-03-10", "3"],
    &["1004", "Emily Davis", "emily.davis@hotmail.com", "(555) 456-7890", "321 Elm St, Brookville, ST 22222", "2023-04-05", "8"],
    &["1005", "Robert Wilson", "bob.wilson@yahoo.com", "(555) 567-8901", "654 Maple Dr, Lakeside, ST 33333", "2023-05-12", "15"],
];

#[rustfmt::skip]
const PRODUCTS: &[&[&str]] = &[
    &["product_code", "item_name", "category", "unit_price", "stock_quantity", "supplier_name"],
    &["P001", "Wireless Headphones", "Electronics", "$89.99", "45", "TechCorp"],
    &["P002", "Coffee Maker", "Appliances", "$129.99", "23", "HomeGoods Inc"],
    &["P003", "Running Shoes", "Sports", "$159.99", "67", "SportMax"],
    &["P004", "Office Chair", "Furniture", "$299.99", "12", "OfficeSupply Co"],
    &["P005", "Smartphone", "Electronics", "$699.99", "34", "TechCorp"],
];

#[rustfmt::skip]
const SALES: &[&[&str]] = &[
    &["transaction_id", "customer_name", "product_sold", "sale_amount", "sale_date", "sales_rep"],
    &["T2023001", "Alice Cooper", "Laptop Pro", "$1299.99", "2023-06-01", "James Wilson"],
    &["T2023002", "Bob Martin", "Desk Lamp", "$45.99", "2023-06-02", "Sarah Lee"],
    &["T2023003", "Carol Smith", "Office Supplies", "$89.50", "2023-06-03", "Mike Johnson"],
    &["T2023004", "David Brown", "Gaming Mouse", "$79.99", "2023-06-04", "James Wilson"],
    &["T2023005", "Eva Johnson", "Monitor", "$299.99", "2023-06-05", "Sarah Lee"],
];

#[rustfmt::skip]
const EMPLOYEES: &[&[&str]] = &[
    &["emp_id", "employee_name", "department", "hire_date", "salary", "manager"],
    &["E001", "Jennifer Adams", "Marketing", "2022-03-15", "$65000", "Susan Taylor"],
    &["E002", "Tom Rodriguez", "Engineering", "2021-08-22", "$85000", "Mark Chen"],
    &["E003", "Lisa Wang", "Sales", "2023-01-10", "$55000", "David Miller"],
    &["E004", "Kevin O'Brien", "HR", "2020-11-05", "$60000", "Patricia Jones"],
    &["E005", "Rachel Green", "Finance", "2022-07-18", "$70000", "Robert Kim"],
];

/// A bundled sample dataset. The first row is a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoDataset {
    Customers,
    Products,
    Sales,
    Employees,
}

impl DemoDataset {
    pub const ALL: [Self; 4] = [Self::Customers, Self::Products, Self::Sales, Self::Employees];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Sales => "sales",
            Self::Employees => "employees",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Customers => "customers.csv",
            Self::Products => "products.csv",
            Self::Sales => "sales_data.csv",
            Self::Employees => "employee_roster.csv",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }

    fn rows(self) -> &'static [&'static [&'static str]] {
        match self {
            Self::Customers => CUSTOMERS,
            Self::Products => PRODUCTS,
            Self::Sales => SALES,
            Self::Employees => EMPLOYEES,
        }
    }

    pub fn grid(self) -> Grid {
        Grid::from_iter(self.rows().iter().map(|row| row.iter().copied()))
    }
}

impl fmt::Display for DemoDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
