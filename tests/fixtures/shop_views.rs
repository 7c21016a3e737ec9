// Code generated by viewlift from MySQL database `shop`. DO NOT EDIT.
//
// Requires the `mysql` crate; chrono, rust_decimal and serde_json columns
// need the matching `mysql` features enabled.
//
// TIME columns map to chrono::NaiveTime, so a value outside 00:00:00..24:00:00
// (MySQL allows -838:59:59..838:59:59) fails to decode and stops its iterator.

#[allow(dead_code, clippy::all)]
pub mod shop {
    fn take_column<T: mysql::prelude::FromValue>(
        row: &mut mysql::Row,
        index: usize,
    ) -> mysql::Result<T> {
        match row.take_opt::<T, usize>(index) {
            Some(Ok(value)) => Ok(value),
            Some(Err(err)) => Err(mysql::Error::FromValueError(err.0)),
            None => Err(mysql::Error::FromRowError(row.clone())),
        }
    }

    /// Row of view `active_users`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ActiveUsers {
        /// `id` int(11)
        pub id: i32,
        /// `Name` text
        pub name: Option<String>,
    }

    impl ActiveUsers {
        pub const VIEW: &'static str = "active_users";

        pub const COLUMNS: &'static [&'static str] = &[
            "id",
            "Name",
        ];

        pub const SELECT: &'static str = "SELECT `id`, `Name` FROM `active_users`";

        /// Scans a row holding the view's columns in ordinal order.
        pub fn from_row(mut row: mysql::Row) -> mysql::Result<Self> {
            if row.len() != Self::COLUMNS.len() {
                return Err(mysql::Error::FromRowError(row));
            }
            Ok(Self {
                id: take_column(&mut row, 0)?,
                name: take_column(&mut row, 1)?,
            })
        }

        /// Runs `SELECT` and iterates over the result.
        pub fn query<Q: mysql::prelude::Queryable>(
            conn: &mut Q,
        ) -> mysql::Result<ActiveUsersIter<mysql::QueryResult<'_, '_, '_, mysql::Text>>> {
            let rows = conn.query_iter(Self::SELECT)?;
            Ok(ActiveUsersIter::new(rows))
        }
    }

    /// Forward-only reader of `active_users` rows.
    pub struct ActiveUsersIter<I> {
        rows: I,
        err: Option<mysql::Error>,
    }

    impl<I> ActiveUsersIter<I>
    where
        I: Iterator<Item = mysql::Result<mysql::Row>>,
    {
        pub fn new(rows: I) -> Self {
            Self { rows, err: None }
        }

        /// Returns the next row, or `None` at the end of rows or after an error.
        pub fn next_row(&mut self) -> Option<ActiveUsers> {
            if self.err.is_some() {
                return None;
            }
            match self.rows.next()?.and_then(ActiveUsers::from_row) {
                Ok(record) => Some(record),
                Err(err) => {
                    self.err = Some(err);
                    None
                }
            }
        }

        /// The error that stopped iteration, if any.
        pub fn err(&self) -> Option<&mysql::Error> {
            self.err.as_ref()
        }
    }

    impl<I> Iterator for ActiveUsersIter<I>
    where
        I: Iterator<Item = mysql::Result<mysql::Row>>,
    {
        type Item = ActiveUsers;

        fn next(&mut self) -> Option<Self::Item> {
            self.next_row()
        }
    }

    /// Row of view `device_flags`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DeviceFlags {
        /// `is_on` tinyint(1)
        pub is_on: bool,
        /// `mask` bit(8)
        pub mask: Option<Vec<u8>>,
        /// `seen_count` bigint unsigned
        pub seen_count: u64,
    }

    impl DeviceFlags {
        pub const VIEW: &'static str = "device_flags";

        pub const COLUMNS: &'static [&'static str] = &[
            "is_on",
            "mask",
            "seen_count",
        ];

        pub const SELECT: &'static str = "SELECT `is_on`, `mask`, `seen_count` FROM `device_flags`";

        /// Scans a row holding the view's columns in ordinal order.
        pub fn from_row(mut row: mysql::Row) -> mysql::Result<Self> {
            if row.len() != Self::COLUMNS.len() {
                return Err(mysql::Error::FromRowError(row));
            }
            Ok(Self {
                is_on: take_column(&mut row, 0)?,
                mask: take_column(&mut row, 1)?,
                seen_count: take_column(&mut row, 2)?,
            })
        }

        /// Runs `SELECT` and iterates over the result.
        pub fn query<Q: mysql::prelude::Queryable>(
            conn: &mut Q,
        ) -> mysql::Result<DeviceFlagsIter<mysql::QueryResult<'_, '_, '_, mysql::Text>>> {
            let rows = conn.query_iter(Self::SELECT)?;
            Ok(DeviceFlagsIter::new(rows))
        }
    }

    /// Forward-only reader of `device_flags` rows.
    pub struct DeviceFlagsIter<I> {
        rows: I,
        err: Option<mysql::Error>,
    }

    impl<I> DeviceFlagsIter<I>
    where
        I: Iterator<Item = mysql::Result<mysql::Row>>,
    {
        pub fn new(rows: I) -> Self {
            Self { rows, err: None }
        }

        /// Returns the next row, or `None` at the end of rows or after an error.
        pub fn next_row(&mut self) -> Option<DeviceFlags> {
            if self.err.is_some() {
                return None;
            }
            match self.rows.next()?.and_then(DeviceFlags::from_row) {
                Ok(record) => Some(record),
                Err(err) => {
                    self.err = Some(err);
                    None
                }
            }
        }

        /// The error that stopped iteration, if any.
        pub fn err(&self) -> Option<&mysql::Error> {
            self.err.as_ref()
        }
    }

    impl<I> Iterator for DeviceFlagsIter<I>
    where
        I: Iterator<Item = mysql::Result<mysql::Row>>,
    {
        type Item = DeviceFlags;

        fn next(&mut self) -> Option<Self::Item> {
            self.next_row()
        }
    }
}
