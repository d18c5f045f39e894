//! Output generation.
//!
//! - [`csv_writer`]: writes a record set as a CSV file with the header
//!   `Link,Title,Location,Salary,Summary`

pub mod csv_writer;
