//! Database schema and catalog seeding binary
//!
//! Creates the storefront tables if they do not exist, then resets the four
//! catalog variant tables to the stock product data. User accounts and
//! orders are never touched, so the seeder is safe to re-run.

use anyhow::Result;
use common::database::{DatabaseConfig, init_pool};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

struct CourseBookRow {
    id: i32,
    title: &'static str,
    category: &'static str,
    degree: &'static str,
    major: &'static str,
    year: i32,
    condition: &'static str,
    price: Decimal,
    description: &'static str,
}

struct NotebookRow {
    id: i32,
    title: &'static str,
    kind: &'static str,
    cover_type: &'static str,
    page_style: &'static str,
    price: Decimal,
    description: &'static str,
}

struct WritingSupplyRow {
    id: i32,
    title: &'static str,
    category: &'static str,
    kind: &'static str,
    colour: &'static str,
    ink_type: &'static str,
    price: Decimal,
    description: &'static str,
}

struct OtherItemRow {
    id: i32,
    title: &'static str,
    category: &'static str,
    kind: &'static str,
    price: Decimal,
    description: &'static str,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    create_schema(&pool).await?;
    clear_catalog(&pool).await?;
    seed_course_books(&pool).await?;
    seed_notebooks(&pool).await?;
    seed_writing_supplies(&pool).await?;
    seed_other_items(&pool).await?;

    info!("Database seeding completed successfully");
    Ok(())
}

async fn create_schema(pool: &PgPool) -> Result<()> {
    info!("Ensuring schema exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            first_name TEXT,
            last_name TEXT,
            cart_items JSONB NOT NULL DEFAULT '[]'::jsonb,
            cart_version BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id),
            items JSONB NOT NULL,
            total NUMERIC(10, 2) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS course_books (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            category TEXT,
            degree TEXT,
            major TEXT,
            year INTEGER,
            condition TEXT,
            price NUMERIC(10, 2) NOT NULL,
            description TEXT,
            view_count INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notebooks (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            type TEXT,
            cover_type TEXT,
            page_style TEXT,
            price NUMERIC(10, 2) NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS writing_supplies (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            category TEXT,
            type TEXT,
            colour TEXT,
            ink_type TEXT,
            price NUMERIC(10, 2) NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS other_items (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            category TEXT,
            type TEXT,
            price NUMERIC(10, 2) NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn clear_catalog(pool: &PgPool) -> Result<()> {
    info!("Clearing existing catalog data");

    for table in ["course_books", "notebooks", "writing_supplies", "other_items"] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(pool)
            .await?;
    }

    Ok(())
}

async fn seed_course_books(pool: &PgPool) -> Result<()> {
    let books = [
        CourseBookRow { id: 1, title: "SOFTENG310 Course Book", category: "Software Engineering", degree: "Bachelor of Engineering", major: "Software Engineering", year: 3, condition: "New", price: Decimal::new(6767, 2), description: "Essential textbook for Software Engineering 310 course covering advanced software development concepts." },
        CourseBookRow { id: 2, title: "COMPSCI101 Course Book", category: "Computer Science", degree: "Bachelor of Engineering", major: "Computer Systems Engineering", year: 1, condition: "Used", price: Decimal::new(4550, 2), description: "Introduction to Computer Science fundamentals and programming concepts." },
        CourseBookRow { id: 3, title: "MECHENG210 Course Book", category: "Mechanical Engineering", degree: "Bachelor of Engineering", major: "Mechanical Engineering", year: 2, condition: "New", price: Decimal::new(8999, 2), description: "Mechanical Engineering principles and design methodologies." },
        CourseBookRow { id: 4, title: "ARTS101 Introduction to Arts", category: "Literature", degree: "Bachelor of Arts", major: "English Literature", year: 1, condition: "New", price: Decimal::new(5500, 2), description: "Comprehensive introduction to the study of arts and humanities." },
        CourseBookRow { id: 5, title: "HISTORY201 Modern History", category: "History", degree: "Bachelor of Arts", major: "History", year: 2, condition: "Used", price: Decimal::new(4275, 2), description: "In-depth study of modern historical events and their impact." },
        CourseBookRow { id: 6, title: "PHILOSOPHY301 Ethics", category: "Philosophy", degree: "Bachelor of Arts", major: "Philosophy", year: 3, condition: "New", price: Decimal::new(6825, 2), description: "Advanced study of ethical theories and moral philosophy." },
        CourseBookRow { id: 7, title: "BUSINESS101 Principles of Business", category: "Management", degree: "Bachelor of Commerce", major: "Business Administration", year: 1, condition: "New", price: Decimal::new(7250, 2), description: "Fundamental principles of business operations and management." },
        CourseBookRow { id: 8, title: "ECONOMICS201 Microeconomics", category: "Economics", degree: "Bachelor of Commerce", major: "Economics", year: 2, condition: "Used", price: Decimal::new(5899, 2), description: "Detailed study of microeconomic principles and market behavior." },
        CourseBookRow { id: 9, title: "ACCOUNTING301 Advanced Accounting", category: "Accounting", degree: "Bachelor of Commerce", major: "Accounting", year: 3, condition: "New", price: Decimal::new(9500, 2), description: "Advanced accounting principles and financial reporting." },
        CourseBookRow { id: 10, title: "DESIGN101 Visual Design Principles", category: "Design", degree: "Bachelor of Design", major: "Graphic Design", year: 1, condition: "New", price: Decimal::new(6500, 2), description: "Introduction to visual design principles and creative processes." },
        CourseBookRow { id: 11, title: "ARCHITECTURE201 Building Design", category: "Architecture", degree: "Bachelor of Architecture", major: "Architecture", year: 2, condition: "Used", price: Decimal::new(8875, 2), description: "Principles of architectural design and building construction." },
        CourseBookRow { id: 12, title: "EDUCATION101 Teaching Methods", category: "Education", degree: "Bachelor of Education", major: "Primary Education", year: 1, condition: "New", price: Decimal::new(6250, 2), description: "Fundamental teaching methods and educational psychology." },
        CourseBookRow { id: 13, title: "SOCIALWORK201 Social Policy", category: "Social Work", degree: "Bachelor of Social Work", major: "Social Work", year: 2, condition: "Used", price: Decimal::new(5425, 2), description: "Study of social policies and their impact on communities." },
        CourseBookRow { id: 14, title: "LAW101 Introduction to Law", category: "Constitutional Law", degree: "Bachelor of Laws", major: "Law", year: 1, condition: "New", price: Decimal::new(7899, 2), description: "Introduction to legal principles and constitutional law." },
        CourseBookRow { id: 15, title: "LAW301 Contract Law", category: "Contract Law", degree: "Bachelor of Laws", major: "Law", year: 3, condition: "Used", price: Decimal::new(9250, 2), description: "Advanced study of contract law and legal obligations." },
        CourseBookRow { id: 16, title: "MEDICINE101 Human Anatomy", category: "Anatomy", degree: "Bachelor of Medicine", major: "Medicine", year: 1, condition: "New", price: Decimal::new(12500, 2), description: "Comprehensive study of human anatomy and physiology." },
        CourseBookRow { id: 17, title: "NURSING201 Clinical Practice", category: "Nursing", degree: "Bachelor of Nursing", major: "Nursing", year: 2, condition: "Used", price: Decimal::new(7525, 2), description: "Clinical practice guidelines and patient care principles." },
        CourseBookRow { id: 18, title: "BIOLOGY101 General Biology", category: "Biology", degree: "Bachelor of Science", major: "Biology", year: 1, condition: "New", price: Decimal::new(6999, 2), description: "Introduction to biological principles and life sciences." },
        CourseBookRow { id: 19, title: "CHEMISTRY201 Organic Chemistry", category: "Chemistry", degree: "Bachelor of Science", major: "Chemistry", year: 2, condition: "Used", price: Decimal::new(8250, 2), description: "Study of organic chemistry and molecular structures." },
        CourseBookRow { id: 20, title: "PHYSICS301 Quantum Physics", category: "Physics", degree: "Bachelor of Science", major: "Physics", year: 3, condition: "New", price: Decimal::new(9875, 2), description: "Advanced study of quantum mechanics and particle physics." },
    ];

    for book in &books {
        sqlx::query(
            r#"
            INSERT INTO course_books (id, title, category, degree, major, year, condition, price, description, view_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0)
            "#,
        )
        .bind(book.id)
        .bind(book.title)
        .bind(book.category)
        .bind(book.degree)
        .bind(book.major)
        .bind(book.year)
        .bind(book.condition)
        .bind(book.price)
        .bind(book.description)
        .execute(pool)
        .await?;
    }

    info!("Seeded {} course books", books.len());
    Ok(())
}

async fn seed_notebooks(pool: &PgPool) -> Result<()> {
    let notebooks = [
        NotebookRow { id: 101, title: "Pink A5 Notebook Lined", kind: "Hardcover Notebooks", cover_type: "Hard Cover", page_style: "Lined", price: Decimal::new(1299, 2), description: "Beautiful pink hardcover notebook with lined pages, perfect for note-taking." },
        NotebookRow { id: 102, title: "Blue A4 Spiral Pad", kind: "A4 Pads", cover_type: "Soft Cover", page_style: "Lined", price: Decimal::new(850, 2), description: "Blue spiral-bound A4 pad with lined pages for everyday use." },
        NotebookRow { id: 103, title: "Green Dot Grid Journal", kind: "Dot Grid", cover_type: "Soft Cover", page_style: "Dot Grid", price: Decimal::new(1575, 2), description: "Green dot grid journal perfect for bullet journaling and creative note-taking." },
        NotebookRow { id: 104, title: "Black Hardcover Notebook", kind: "Hardcover Notebooks", cover_type: "Hard Cover", page_style: "Blank", price: Decimal::new(1899, 2), description: "Professional black hardcover notebook with blank pages for sketches and notes." },
        NotebookRow { id: 105, title: "Yellow A5 Softcover", kind: "A5 Pads", cover_type: "Soft Cover", page_style: "Lined", price: Decimal::new(699, 2), description: "Bright yellow A5 softcover notebook with lined pages." },
        NotebookRow { id: 106, title: "Colorful Sticky Notes Set", kind: "Sticky Notes", cover_type: "N/A", page_style: "N/A", price: Decimal::new(425, 2), description: "Set of colorful sticky notes in various sizes and colors." },
        NotebookRow { id: 107, title: "Index Tabs Pack", kind: "Index Tabs", cover_type: "N/A", page_style: "N/A", price: Decimal::new(350, 2), description: "Pack of index tabs for organizing notebooks and documents." },
        NotebookRow { id: 108, title: "White A4 Blank Pad", kind: "A4 Pads", cover_type: "Soft Cover", page_style: "Blank", price: Decimal::new(799, 2), description: "White A4 pad with blank pages for drawing and writing." },
    ];

    for notebook in &notebooks {
        sqlx::query(
            r#"
            INSERT INTO notebooks (id, title, type, cover_type, page_style, price, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notebook.id)
        .bind(notebook.title)
        .bind(notebook.kind)
        .bind(notebook.cover_type)
        .bind(notebook.page_style)
        .bind(notebook.price)
        .bind(notebook.description)
        .execute(pool)
        .await?;
    }

    info!("Seeded {} notebooks", notebooks.len());
    Ok(())
}

async fn seed_writing_supplies(pool: &PgPool) -> Result<()> {
    let supplies = [
        WritingSupplyRow { id: 201, title: "Premium Black Ink Ballpoint Pen", category: "Pens", kind: "Ballpoint", colour: "Black", ink_type: "Black Ink", price: Decimal::new(599, 2), description: "Smooth-writing ballpoint pen with black ink, comfortable grip." },
        WritingSupplyRow { id: 202, title: "Blue Gel Pen Set", category: "Pens", kind: "Gel", colour: "Blue", ink_type: "Blue Ink", price: Decimal::new(850, 2), description: "Set of blue gel pens with smooth writing experience." },
        WritingSupplyRow { id: 203, title: "Fountain Pen with Gold Nib", category: "Pens", kind: "Fountain", colour: "Multi Coloured", ink_type: "Black Ink", price: Decimal::new(2599, 2), description: "Premium fountain pen with gold nib for elegant writing." },
        WritingSupplyRow { id: 204, title: "Yellow Highlighter Pack", category: "Highlighters", kind: "Highlighters", colour: "Yellow", ink_type: "N/A", price: Decimal::new(675, 2), description: "Pack of yellow highlighters for marking important text." },
        WritingSupplyRow { id: 205, title: "Fine Liner Set", category: "Fineliners", kind: "Fineliners", colour: "Multi Coloured", ink_type: "N/A", price: Decimal::new(1299, 2), description: "Set of fine liner pens in various colors for detailed work." },
        WritingSupplyRow { id: 206, title: "Mechanical Pencil Set", category: "Pencils", kind: "Pencils", colour: "Multi Coloured", ink_type: "N/A", price: Decimal::new(925, 2), description: "Set of mechanical pencils with different lead sizes." },
        WritingSupplyRow { id: 207, title: "Pink Eraser Pack", category: "Erasers", kind: "Erasers", colour: "Pink", ink_type: "N/A", price: Decimal::new(399, 2), description: "Pack of pink erasers for clean erasing." },
        WritingSupplyRow { id: 208, title: "Pencil Sharpener", category: "Sharpeners", kind: "Sharpeners", colour: "Multi Coloured", ink_type: "N/A", price: Decimal::new(250, 2), description: "Durable pencil sharpener for all pencil types." },
    ];

    for supply in &supplies {
        sqlx::query(
            r#"
            INSERT INTO writing_supplies (id, title, category, type, colour, ink_type, price, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(supply.id)
        .bind(supply.title)
        .bind(supply.category)
        .bind(supply.kind)
        .bind(supply.colour)
        .bind(supply.ink_type)
        .bind(supply.price)
        .bind(supply.description)
        .execute(pool)
        .await?;
    }

    info!("Seeded {} writing supplies", supplies.len());
    Ok(())
}

async fn seed_other_items(pool: &PgPool) -> Result<()> {
    let items = [
        OtherItemRow { id: 301, title: "Casio Scientific Calculator", category: "Calculators", kind: "Calculators", price: Decimal::new(6999, 2), description: "Advanced scientific calculator with multiple functions for engineering and science courses." },
        OtherItemRow { id: 302, title: "30cm Ruler Set", category: "Rulers", kind: "Rulers", price: Decimal::new(450, 2), description: "Set of 30cm rulers in different materials and colors." },
        OtherItemRow { id: 303, title: "A4 Folder with Pockets", category: "Folders & Files", kind: "Folders & Files", price: Decimal::new(799, 2), description: "A4 folder with multiple pockets for organizing documents." },
        OtherItemRow { id: 304, title: "3-Ring Binder", category: "Binders", kind: "Binders", price: Decimal::new(1275, 2), description: "Durable 3-ring binder for organizing course materials." },
        OtherItemRow { id: 305, title: "Desktop Stapler", category: "Staplers", kind: "Staplers", price: Decimal::new(1550, 2), description: "Heavy-duty desktop stapler for office and study use." },
        OtherItemRow { id: 306, title: "Safety Scissors Set", category: "Scissors", kind: "Scissors", price: Decimal::new(899, 2), description: "Set of safety scissors in different sizes for various tasks." },
        OtherItemRow { id: 307, title: "White Glue Bottle", category: "Glue", kind: "Glue", price: Decimal::new(325, 2), description: "White glue bottle for arts and crafts projects." },
    ];

    for item in &items {
        sqlx::query(
            r#"
            INSERT INTO other_items (id, title, category, type, price, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id)
        .bind(item.title)
        .bind(item.category)
        .bind(item.kind)
        .bind(item.price)
        .bind(item.description)
        .execute(pool)
        .await?;
    }

    info!("Seeded {} other items", items.len());
    Ok(())
}
