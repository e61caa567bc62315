//! Mapped fixture types shared by the integration suite.
//!
//! Each type carries a process-unique [`ModelId`] and exposes its mapped
//! fields as typed [`Column`] constants for condition capture.

use quarry::schema::FieldId;
use quarry::stmt::Column;
use quarry::{
    Entity, EnumValue, Error, FieldSpec, GeneratorStrategy, Lazy, ModelId, Result, TableBuilder,
    TableDef, Type, Value, ValueRecord,
};

/// Plain entity with an engine-assigned key and a nullable field.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: i32,
}

impl User {
    pub const ID_COL: Column<i64> = Column::new(Self::ID, 0);
    pub const NAME: Column<String> = Column::new(Self::ID, 1);
    pub const EMAIL: Column<Option<String>> = Column::new(Self::ID, 2);
    pub const AGE: Column<i32> = Column::new(Self::ID, 3);

    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: None,
            age,
        }
    }
}

impl Entity for User {
    const ID: ModelId = ModelId(1);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "User", "users")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("name", Type::Text))
            .field(FieldSpec::new("email", Type::Text).nullable())
            .field(FieldSpec::new("age", Type::Integer))
            .generator(GeneratorStrategy::Identity)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            name: row.take(1).to_string_value()?,
            email: row.take(2).to_option(Value::to_string_value)?,
            age: row.take(3).to_i32()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.email.clone().into(),
            self.age.into(),
        ]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

/// Caller-assigned key plus an optimistic-lock version column.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub version: i64,
}

impl Document {
    pub const TITLE: Column<String> = Column::new(Self::ID, 1);

    pub fn new(id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            version: 0,
        }
    }
}

impl Entity for Document {
    const ID: ModelId = ModelId(2);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Document", "documents")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("title", Type::Text))
            .field(FieldSpec::new("body", Type::Clob))
            .field(FieldSpec::new("version", Type::BigInt).version())
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            title: row.take(1).to_string_value()?,
            body: row.take(2).to_string_value()?,
            version: row.take(3).to_i64()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.title.clone().into(),
            self.body.clone().into(),
            self.version.into(),
        ]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }

    fn version(&self) -> Option<i64> {
        Some(self.version)
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

/// Single-table inheritance: both variants share one physical table, told
/// apart by the `dtype` discriminator column.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { id: i64, radius: f64 },
    Rectangle { id: i64, width: f64, height: f64 },
}

impl Shape {
    pub const DTYPE: Column<String> = Column::new(Self::ID, 1);

    const CIRCLE: &'static str = "CI";
    const RECTANGLE: &'static str = "RE";
}

impl Entity for Shape {
    const ID: ModelId = ModelId(3);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Shape", "shapes")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("dtype", Type::Text).length(2))
            .field(FieldSpec::new("radius", Type::Double).nullable())
            .field(FieldSpec::new("width", Type::Double).nullable())
            .field(FieldSpec::new("height", Type::Double).nullable())
            .generator(GeneratorStrategy::Identity)
            .discriminator("dtype")
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        let id = row.take(0).to_i64()?;
        let dtype = row.take(1).to_string_value()?;
        match dtype.as_str() {
            Self::CIRCLE => Ok(Self::Circle {
                id,
                radius: row.take(2).to_f64()?,
            }),
            Self::RECTANGLE => Ok(Self::Rectangle {
                id,
                width: row.take(3).to_f64()?,
                height: row.take(4).to_f64()?,
            }),
            other => Err(Error::configuration(format!(
                "unknown shape discriminator `{other}`"
            ))),
        }
    }

    fn values(&self) -> Vec<Value> {
        match self {
            Self::Circle { id, radius } => vec![
                (*id).into(),
                Self::CIRCLE.into(),
                (*radius).into(),
                Value::Null,
                Value::Null,
            ],
            Self::Rectangle { id, width, height } => vec![
                (*id).into(),
                Self::RECTANGLE.into(),
                Value::Null,
                (*width).into(),
                (*height).into(),
            ],
        }
    }

    fn key(&self) -> Value {
        match self {
            Self::Circle { id, .. } | Self::Rectangle { id, .. } => (*id).into(),
        }
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        let key = key.to_i64()?;
        match self {
            Self::Circle { id, .. } | Self::Rectangle { id, .. } => *id = key,
        }
        Ok(())
    }
}

/// Parent of a lazy, cascade-deleting to-many relation.
#[derive(Debug)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub tracks: Lazy<Track>,
}

impl Playlist {
    pub const ID_COL: Column<i64> = Column::new(Self::ID, 0);
    pub const NAME: Column<String> = Column::new(Self::ID, 1);

    /// Relation index of `tracks`.
    pub const TRACKS: usize = 0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            tracks: Lazy::default(),
        }
    }
}

impl Entity for Playlist {
    const ID: ModelId = ModelId(4);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Playlist", "playlists")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("name", Type::Text))
            .generator(GeneratorStrategy::Identity)
            .has_many(Track::ID, FieldId::new(Track::ID, 1), true, false)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        let id = row.take(0).to_i64()?;
        Ok(Self {
            id,
            name: row.take(1).to_string_value()?,
            tracks: Lazy::deferred(Self::ID, Self::TRACKS, id.into()),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![self.id.into(), self.name.clone().into()]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: i64,
    pub playlist_id: i64,
    pub title: String,
}

impl Track {
    /// The owning playlist as an entity operand; compares by its key.
    pub const PLAYLIST: Column<Playlist> = Column::new(Self::ID, 1);
    pub const PLAYLIST_ID: Column<i64> = Column::new(Self::ID, 1);
    pub const TITLE: Column<String> = Column::new(Self::ID, 2);

    pub fn new(playlist_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            playlist_id,
            title: title.into(),
        }
    }
}

impl Entity for Track {
    const ID: ModelId = ModelId(5);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Track", "tracks")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("playlist_id", Type::ForeignKey))
            .field(FieldSpec::new("title", Type::Text))
            .generator(GeneratorStrategy::Identity)
            .belongs_to(Playlist::ID, FieldId::new(Self::ID, 1))
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            playlist_id: row.take(1).to_i64()?,
            title: row.take(2).to_string_value()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.playlist_id.into(),
            self.title.clone().into(),
        ]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

/// Parent of an eager to-many relation; songs hydrate with the album.
#[derive(Debug)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub songs: Vec<Song>,
}

impl Album {
    pub const TITLE: Column<String> = Column::new(Self::ID, 1);

    /// Relation index of `songs`.
    pub const SONGS: usize = 0;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            songs: Vec::new(),
        }
    }
}

impl Entity for Album {
    const ID: ModelId = ModelId(6);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Album", "albums")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("title", Type::Text))
            .generator(GeneratorStrategy::Identity)
            .has_many(Song::ID, FieldId::new(Song::ID, 1), true, true)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            title: row.take(1).to_string_value()?,
            songs: Vec::new(),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![self.id.into(), self.title.clone().into()]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }

    fn load_relation(&mut self, relation: usize, rows: Vec<ValueRecord>) -> Result<()> {
        match relation {
            Self::SONGS => {
                self.songs = rows.into_iter().map(Song::load).collect::<Result<_>>()?;
                Ok(())
            }
            other => Err(Error::configuration(format!(
                "`Album` has no eager relation {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: i64,
    pub album_id: i64,
    pub title: String,
}

impl Song {
    pub const TITLE: Column<String> = Column::new(Self::ID, 2);

    pub fn new(album_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            album_id,
            title: title.into(),
        }
    }
}

impl Entity for Song {
    const ID: ModelId = ModelId(7);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Song", "songs")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("album_id", Type::ForeignKey))
            .field(FieldSpec::new("title", Type::Text))
            .generator(GeneratorStrategy::Identity)
            .belongs_to(Album::ID, FieldId::new(Self::ID, 1))
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            album_id: row.take(1).to_i64()?,
            title: row.take(2).to_string_value()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.album_id.into(),
            self.title.clone().into(),
        ]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

/// Parent of a non-cascading to-many relation; deleting a team leaves its
/// players behind.
#[derive(Debug)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub players: Lazy<Player>,
}

impl Team {
    /// Relation index of `players`.
    pub const PLAYERS: usize = 0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            players: Lazy::default(),
        }
    }
}

impl Entity for Team {
    const ID: ModelId = ModelId(8);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Team", "teams")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("name", Type::Text))
            .generator(GeneratorStrategy::Identity)
            .has_many(Player::ID, FieldId::new(Player::ID, 1), false, false)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        let id = row.take(0).to_i64()?;
        Ok(Self {
            id,
            name: row.take(1).to_string_value()?,
            players: Lazy::deferred(Self::ID, Self::PLAYERS, id.into()),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![self.id.into(), self.name.clone().into()]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
}

impl Player {
    pub const TEAM_ID: Column<i64> = Column::new(Self::ID, 1);

    pub fn new(team_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            team_id,
            name: name.into(),
        }
    }
}

impl Entity for Player {
    const ID: ModelId = ModelId(9);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Player", "players")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("team_id", Type::ForeignKey))
            .field(FieldSpec::new("name", Type::Text))
            .generator(GeneratorStrategy::Identity)
            .belongs_to(Team::ID, FieldId::new(Self::ID, 1))
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            team_id: row.take(1).to_i64()?,
            name: row.take(2).to_string_value()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.team_id.into(),
            self.name.clone().into(),
        ]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

/// Many-to-many source side; tags link through the `post_tags` join table.
#[derive(Debug)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub tags: Lazy<Tag>,
}

impl Post {
    pub const TITLE: Column<String> = Column::new(Self::ID, 1);

    /// Relation index of `tags`.
    pub const TAGS: usize = 0;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            tags: Lazy::default(),
        }
    }
}

impl Entity for Post {
    const ID: ModelId = ModelId(10);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Post", "posts")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("title", Type::Text))
            .generator(GeneratorStrategy::Identity)
            .many_to_many(Tag::ID, "post_tags", "post_id", "tag_id", true, false)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        let id = row.take(0).to_i64()?;
        Ok(Self {
            id,
            title: row.take(1).to_string_value()?,
            tags: Lazy::deferred(Self::ID, Self::TAGS, id.into()),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![self.id.into(), self.title.clone().into()]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub const NAME: Column<String> = Column::new(Self::ID, 1);

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl Entity for Tag {
    const ID: ModelId = ModelId(11);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Tag", "tags")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("name", Type::Text).unique())
            .generator(GeneratorStrategy::Identity)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            name: row.take(1).to_string_value()?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![self.id.into(), self.name.clone().into()]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}

/// Stored by variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Draft,
    Active,
    Done,
}

impl EnumValue for Status {
    fn variant_name(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Done => "DONE",
        }
    }

    fn ordinal(&self) -> i32 {
        match self {
            Self::Draft => 0,
            Self::Active => 1,
            Self::Done => 2,
        }
    }

    fn from_name(name: &str) -> Result<Self> {
        match name {
            "DRAFT" => Ok(Self::Draft),
            "ACTIVE" => Ok(Self::Active),
            "DONE" => Ok(Self::Done),
            _ => Err(Error::type_conversion(Value::String(name.into()), "Status")),
        }
    }

    fn from_ordinal(ordinal: i32) -> Result<Self> {
        match ordinal {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Active),
            2 => Ok(Self::Done),
            _ => Err(Error::type_conversion(Value::I32(ordinal), "Status")),
        }
    }
}

impl From<Status> for Value {
    fn from(status: Status) -> Self {
        status.to_value()
    }
}

/// Stored by variant ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl EnumValue for Priority {
    fn variant_name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    fn ordinal(&self) -> i32 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    fn from_name(name: &str) -> Result<Self> {
        match name {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(Error::type_conversion(
                Value::String(name.into()),
                "Priority",
            )),
        }
    }

    fn from_ordinal(ordinal: i32) -> Result<Self> {
        match ordinal {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            _ => Err(Error::type_conversion(Value::I32(ordinal), "Priority")),
        }
    }
}

impl From<Priority> for Value {
    fn from(priority: Priority) -> Self {
        priority.to_value()
    }
}

/// Carries one name-stored and one ordinal-stored enum field.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub priority: Priority,
}

impl Task {
    pub const NAME: Column<String> = Column::new(Self::ID, 1);
    pub const STATUS: Column<Status> = Column::new(Self::ID, 2);
    pub const PRIORITY: Column<Priority> = Column::new(Self::ID, 3);

    pub fn new(name: impl Into<String>, status: Status, priority: Priority) -> Self {
        Self {
            id: 0,
            name: name.into(),
            status,
            priority,
        }
    }
}

impl Entity for Task {
    const ID: ModelId = ModelId(12);

    fn table() -> Result<TableDef> {
        TableBuilder::new(Self::ID, "Task", "task_items")
            .field(FieldSpec::new("id", Type::BigInt).primary_key())
            .field(FieldSpec::new("name", Type::Text))
            .field(FieldSpec::new("status", Type::Enum).length(16))
            .field(FieldSpec::new("priority", Type::EnumInt))
            .generator(GeneratorStrategy::Identity)
            .build()
    }

    fn load(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            name: row.take(1).to_string_value()?,
            status: Status::from_value(row.take(2))?,
            priority: Priority::from_value(row.take(3))?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.status.into(),
            self.priority.into(),
        ]
    }

    fn key(&self) -> Value {
        self.id.into()
    }

    fn set_key(&mut self, key: Value) -> Result<()> {
        self.id = key.to_i64()?;
        Ok(())
    }
}
