use std::str::FromStr;

/// SQL Server types with a debug placeholder value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Bit,
    Money,
    SmallMoney,
    Decimal,
    Numeric,
    Float,
    Date,
    Time,
    DateTime,
    SmallDateTime,
    DateTime2,
    DateTimeOffset,
    NVarChar,
    VarChar,
    NChar,
    Char,
    NText,
    Text,
    SysName,
    Binary,
    VarBinary,
    Geometry,
    Geography,
    UniqueIdentifier,
}

impl SqlType {
    /// Identify the base type of a type as written (`NVARCHAR(50)`, `[int]`).
    pub fn parse(data_type: &str) -> Option<Self> {
        let base = data_type
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or("");
        base.trim_matches(|c| c == '[' || c == ']').parse().ok()
    }

    /// Placeholder literal for a parameter of this type.
    ///
    /// `written` is the type as it appears in the definition; binary types
    /// cast to it.
    pub fn placeholder(&self, written: &str) -> String {
        let value = match self {
            SqlType::TinyInt => "12",
            SqlType::SmallInt => "2515",
            SqlType::Int => "845655",
            SqlType::BigInt => "6223372036854775807",
            SqlType::Bit => "1",
            SqlType::Money => "158.25",
            SqlType::SmallMoney => "5.12",
            SqlType::Decimal => "1.23434",
            SqlType::Numeric => "1.2344",
            SqlType::Float => "9.33432",
            SqlType::Date => "'2020-01-01'",
            SqlType::Time => "'11:45:54'",
            SqlType::DateTime | SqlType::DateTime2 => "'2020-01-01 11:45:54'",
            SqlType::SmallDateTime => "'2020-01-01 11:45'",
            SqlType::DateTimeOffset => "'2020-01-01 11:45:54 +00:00'",
            SqlType::NVarChar | SqlType::SysName => "N'A'",
            SqlType::VarChar => "'A'",
            SqlType::NChar => "N'X'",
            SqlType::Char => "'X'",
            SqlType::NText => "N'B'",
            SqlType::Text => "'B'",
            SqlType::Binary | SqlType::VarBinary => {
                return format!("CAST(123456 AS {})", written.trim().to_uppercase());
            }
            SqlType::Geometry => "GEOMETRY::STPointFromText('POINT (100 100)', 0)",
            SqlType::Geography => {
                "GEOGRAPHY::STGeomFromText('LINESTRING(-122.360 47.656, -122.343 47.656)', 4326)"
            }
            SqlType::UniqueIdentifier => "'00000000-0000-0000-0000-000000000000'",
        };
        value.to_string()
    }
}

impl FromStr for SqlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tinyint" => Ok(SqlType::TinyInt),
            "smallint" => Ok(SqlType::SmallInt),
            "int" | "integer" => Ok(SqlType::Int),
            "bigint" => Ok(SqlType::BigInt),
            "bit" => Ok(SqlType::Bit),
            "money" => Ok(SqlType::Money),
            "smallmoney" => Ok(SqlType::SmallMoney),
            "decimal" | "dec" => Ok(SqlType::Decimal),
            "numeric" => Ok(SqlType::Numeric),
            "float" | "real" | "double" => Ok(SqlType::Float),
            "date" => Ok(SqlType::Date),
            "time" => Ok(SqlType::Time),
            "datetime" => Ok(SqlType::DateTime),
            "smalldatetime" => Ok(SqlType::SmallDateTime),
            "datetime2" => Ok(SqlType::DateTime2),
            "datetimeoffset" => Ok(SqlType::DateTimeOffset),
            "nvarchar" => Ok(SqlType::NVarChar),
            "varchar" => Ok(SqlType::VarChar),
            "nchar" => Ok(SqlType::NChar),
            "char" => Ok(SqlType::Char),
            "ntext" => Ok(SqlType::NText),
            "text" => Ok(SqlType::Text),
            "sysname" => Ok(SqlType::SysName),
            "binary" => Ok(SqlType::Binary),
            "varbinary" => Ok(SqlType::VarBinary),
            "geometry" => Ok(SqlType::Geometry),
            "geography" => Ok(SqlType::Geography),
            "uniqueidentifier" => Ok(SqlType::UniqueIdentifier),
            _ => Err(format!("unsupported type '{}'", s)),
        }
    }
}
