use craftuary_db::entities::theme;
use sea_orm::Order;

/// Sortable catalog columns. A requested sort key outside this closed set
/// falls back to `CreatedAt` instead of erroring, so arbitrary caller input
/// never reaches the query as an identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortColumn {
    CreatedAt,
    Name,
    Downloads,
    Views,
    Price,
    UpdatedAt,
}

impl SortColumn {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("created_at") => Self::CreatedAt,
            Some("name") => Self::Name,
            Some("downloads") => Self::Downloads,
            Some("views") => Self::Views,
            Some("price") => Self::Price,
            Some("updated_at") => Self::UpdatedAt,
            _ => Self::CreatedAt,
        }
    }

    pub fn column(self) -> theme::Column {
        match self {
            Self::CreatedAt => theme::Column::CreatedAt,
            Self::Name => theme::Column::Name,
            Self::Downloads => theme::Column::Downloads,
            Self::Views => theme::Column::Views,
            Self::Price => theme::Column::Price,
            Self::UpdatedAt => theme::Column::UpdatedAt,
        }
    }
}

/// Sort direction, defaulting to descending for anything unrecognized.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(p) if p.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}
