use anyhow::anyhow;
use rollcall_core::AppError;
use rollcall_models::{Course, CreateCourseDto, EnrollStudentsDto, EnrollmentResponse};
use sqlx::PgPool;
use tracing::instrument;

use crate::{audit_event, security_event};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto))]
    pub async fn create_course(
        db: &PgPool,
        teacher_id: i64,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (name, code, grade, teacher_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, code, grade, teacher_id, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(&dto.grade)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!(
                    "A course with this name or code already exists"
                ));
            }
            AppError::database(e)
        })?;

        audit_event!("course.created", "courses", course.id = course.id, teacher.id = teacher_id);

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn find_course_by_id(db: &PgPool, course_id: i64) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, name, code, grade, teacher_id, created_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)
    }

    /// Loads a course the caller teaches: 404 when it does not exist, 403
    /// when it belongs to another teacher.
    pub async fn find_owned_course(
        db: &PgPool,
        course_id: i64,
        teacher_id: i64,
    ) -> Result<Course, AppError> {
        let course = Self::find_course_by_id(db, course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))?;

        if course.teacher_id != teacher_id {
            security_event!(
                "course.not_owner",
                course.id = course_id,
                teacher.id = teacher_id,
                "Teacher attempted to manage another teacher's course"
            );
            return Err(AppError::forbidden(
                "Access denied. You do not teach this course.",
            ));
        }

        Ok(course)
    }

    /// Enrolls students by university id. All ids must resolve to students;
    /// existing enrollments are left as they are.
    #[instrument(skip(db, dto))]
    pub async fn enroll_students(
        db: &PgPool,
        course_id: i64,
        dto: EnrollStudentsDto,
    ) -> Result<EnrollmentResponse, AppError> {
        let mut university_ids: Vec<String> = dto
            .students
            .into_iter()
            .map(|student| student.university_id)
            .collect();
        university_ids.sort();
        university_ids.dedup();

        let students: Vec<(i64, String)> = sqlx::query_as(
            r#"
            SELECT id, university_id
            FROM users
            WHERE role = 'student' AND university_id = ANY($1)
            "#,
        )
        .bind(&university_ids)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let missing: Vec<&str> = university_ids
            .iter()
            .filter(|id| !students.iter().any(|(_, found)| found == *id))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::not_found(anyhow!(
                "No student found with university id: {}",
                missing.join(", ")
            )));
        }

        let student_ids: Vec<i64> = students.iter().map(|(id, _)| *id).collect();

        let mut tx = db.begin().await.map_err(AppError::database)?;
        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (student_id, course_id)
            SELECT student_id, $2 FROM UNNEST($1::BIGINT[]) AS student_id
            ON CONFLICT (student_id, course_id) DO NOTHING
            "#,
        )
        .bind(&student_ids)
        .bind(course_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::database)?;
        tx.commit().await.map_err(AppError::database)?;

        let enrolled = result.rows_affected() as usize;
        audit_event!("course.enrolled", "enrollments", course.id = course_id, enrolled);

        Ok(EnrollmentResponse { course_id, enrolled })
    }
}
