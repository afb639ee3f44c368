use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Course entity - a unit of teaching content with an owner and lessons
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Course {
    /// Unique identifier
    pub id: Uuid,
    /// Course title, used as the subject of update notifications
    pub title: String,
    /// Course description
    pub description: String,
    /// User who created the course; scoping is keyed on this
    pub owner_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Lesson entity - belongs to exactly one course
///
/// A lesson carries its own owner, independent of the course owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Lesson {
    /// Unique identifier
    pub id: Uuid,
    /// Parent course
    pub course_id: Uuid,
    /// Lesson title
    pub title: String,
    /// Lesson description
    pub description: String,
    /// Optional video recording URL
    pub video_url: Option<String>,
    /// User who created the lesson
    pub owner_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new course
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourse {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating an existing course
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourse {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
}

/// DTO for creating a new lesson
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLesson {
    pub course_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub video_url: Option<String>,
}

/// DTO for updating an existing lesson
///
/// The parent course is fixed at creation and cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLesson {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
}

/// Query filters for listing courses
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct CourseFilter {
    /// Restrict to courses owned by this user (within the actor's scope)
    pub owner_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// Query filters for listing lessons
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct LessonFilter {
    pub course_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for CourseFilter {
    fn default() -> Self {
        Self {
            owner_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Default for LessonFilter {
    fn default() -> Self {
        Self {
            course_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Course {
    /// Create a new course from CreateCourse DTO, owned by `owner_id`
    pub fn new(input: CreateCourse, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateCourse DTO
    pub fn apply_update(&mut self, update: UpdateCourse) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}

impl Lesson {
    /// Create a new lesson from CreateLesson DTO, owned by `owner_id`
    pub fn new(input: CreateLesson, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            course_id: input.course_id,
            title: input.title,
            description: input.description,
            video_url: input.video_url,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateLesson DTO
    pub fn apply_update(&mut self, update: UpdateLesson) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(video_url) = update.video_url {
            self.video_url = Some(video_url);
        }
        self.updated_at = Utc::now();
    }
}
