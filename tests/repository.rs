use tapiceria_portal::domain::client::{NewClient, UpdateClient};
use tapiceria_portal::domain::employee::{EmployeeRole, NewEmployee};
use tapiceria_portal::domain::job::{JobStatus, NewJob};
use tapiceria_portal::domain::material::{MaterialCategory, NewMaterial};
use tapiceria_portal::domain::quote::{NewQuote, QuoteReview, QuoteStatus};
use tapiceria_portal::domain::types::{
    Cents, ClientId, EmailAddress, JobTitle, MaterialName, MeasureUnit, PersonName, PhoneNumber,
    SanitizedText, StockLevel, StreetAddress,
};
use tapiceria_portal::repository::errors::RepositoryError;
use tapiceria_portal::repository::{
    ClientListQuery, ClientReader, ClientWriter, DieselRepository, EmployeeListQuery,
    EmployeeReader, EmployeeWriter, JobListQuery, JobReader, JobWriter, MaterialListQuery,
    MaterialReader, MaterialWriter, QuoteListQuery, QuoteReader, QuoteWriter,
};

mod common;

fn new_client(name: &str, email: Option<&str>) -> NewClient {
    NewClient::new(
        PersonName::new(name).unwrap(),
        email.map(|email| EmailAddress::new(email).unwrap()),
        None,
        None,
    )
}

fn new_employee(name: &str, email: &str, role: EmployeeRole) -> NewEmployee {
    NewEmployee {
        name: PersonName::new(name).unwrap(),
        email: EmailAddress::new(email).unwrap(),
        phone: None,
        role,
        active: true,
    }
}

fn new_job(client_id: ClientId, title: &str) -> NewJob {
    NewJob {
        client_id,
        employee_id: None,
        title: JobTitle::new(title).unwrap(),
        description: None,
        status: JobStatus::Pending,
        price: Cents::new(15_000).unwrap(),
        due_date: None,
    }
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = repo
        .create_client(&new_client("Alice", Some("alice@example.com")))
        .unwrap();
    let bob = repo
        .create_client(&new_client("Bob", Some("bob@example.com")))
        .unwrap();
    assert!(alice.active);

    let (total, items) = repo.list_clients(ClientListQuery::default()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].name.as_str(), "Alice");

    let (search_total, search_items) = repo
        .list_clients(ClientListQuery::default().search("bob@"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].id, bob.id);

    let updates = UpdateClient {
        name: PersonName::new("Bobby").unwrap(),
        email: bob.email.clone(),
        phone: Some(PhoneNumber::new("+34 600 123 456").unwrap()),
        address: Some(StreetAddress::new("Calle Mayor 1").unwrap()),
        active: false,
    };
    let updated = repo.update_client(bob.id, &updates).unwrap();
    assert_eq!(updated.name.as_str(), "Bobby");
    assert_eq!(updated.phone.as_ref().map(|p| p.as_str()), Some("+34600123456"));
    assert!(!updated.active);

    let (active_total, _) = repo
        .list_clients(ClientListQuery::default().active(true))
        .unwrap();
    assert_eq!(active_total, 1);

    repo.delete_client(alice.id).unwrap();
    assert!(repo.get_client_by_id(alice.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_client(alice.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_client_email_is_unique() {
    let test_db = common::TestDb::new("test_client_email_is_unique.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_client(&new_client("Ana", Some("ana@example.com")))
        .unwrap();
    let duplicate = repo.create_client(&new_client("Ana B", Some("ANA@example.com")));

    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[test]
fn test_client_pagination_reports_full_total() {
    let test_db = common::TestDb::new("test_client_pagination.db");
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..12 {
        repo.create_client(&new_client(&format!("Cliente {i:02}"), None))
            .unwrap();
    }

    let (total, page) = repo
        .list_clients(ClientListQuery::default().paginate(3, 5))
        .unwrap();

    assert_eq!(total, 12);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name.as_str(), "Cliente 10");
}

#[test]
fn test_employee_role_filter_and_delete_unassigns_jobs() {
    let test_db = common::TestDb::new("test_employee_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let marta = repo
        .create_employee(&new_employee(
            "Marta",
            "marta@tapiceria.es",
            EmployeeRole::Seamstress,
        ))
        .unwrap();
    repo.create_employee(&new_employee(
        "Luis",
        "luis@tapiceria.es",
        EmployeeRole::Carpenter,
    ))
    .unwrap();

    let (total, seamstresses) = repo
        .list_employees(EmployeeListQuery::default().role(EmployeeRole::Seamstress))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(seamstresses[0].id, marta.id);

    let client = repo.create_client(&new_client("Ana", None)).unwrap();
    let mut job = new_job(client.id, "Sofá chester");
    job.employee_id = Some(marta.id);
    let job = repo.create_job(&job).unwrap();

    repo.delete_employee(marta.id).unwrap();

    let job = repo.get_job_by_id(job.id).unwrap().unwrap();
    assert_eq!(job.employee_id, None);
    assert!(repo.get_employee_by_id(marta.id).unwrap().is_none());
}

#[test]
fn test_material_category_filter() {
    let test_db = common::TestDb::new("test_material_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let material = |name: &str, category| NewMaterial {
        name: MaterialName::new(name).unwrap(),
        category,
        unit: MeasureUnit::new("m").unwrap(),
        unit_price: Cents::new(2_450).unwrap(),
        stock: StockLevel::new(30).unwrap(),
        active: true,
    };

    let velvet = repo
        .create_material(&material("Terciopelo azul", MaterialCategory::Fabric))
        .unwrap();
    repo.create_material(&material("Espuma HR 35", MaterialCategory::Foam))
        .unwrap();

    let (total, fabrics) = repo
        .list_materials(MaterialListQuery::default().category(MaterialCategory::Fabric))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(fabrics[0].id, velvet.id);

    let (total, _) = repo
        .list_materials(MaterialListQuery::default().search("espuma"))
        .unwrap();
    assert_eq!(total, 1);

    let mut changes = material("Terciopelo azul", MaterialCategory::Fabric);
    changes.stock = StockLevel::new(4).unwrap();
    changes.active = false;
    let updated = repo.update_material(velvet.id, &changes).unwrap();
    assert_eq!(updated.stock, StockLevel::new(4).unwrap());

    let (total, _) = repo
        .list_materials(MaterialListQuery::default().active(true))
        .unwrap();
    assert_eq!(total, 1);

    repo.delete_material(velvet.id).unwrap();
    assert!(repo.get_material_by_id(velvet.id).unwrap().is_none());
}

#[test]
fn test_quote_lifecycle() {
    let test_db = common::TestDb::new("test_quote_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let request = NewQuote::new(
        PersonName::new("Carmen").unwrap(),
        EmailAddress::new("carmen@example.com").unwrap(),
        None,
        SanitizedText::new("Retapizar dos sillas de comedor").unwrap(),
    );
    let quote = repo.create_quote(&request).unwrap();
    assert_eq!(quote.status, QuoteStatus::Pending);
    assert_eq!(quote.public_id, request.public_id);

    let other = NewQuote::new(
        PersonName::new("Pablo").unwrap(),
        EmailAddress::new("pablo@example.com").unwrap(),
        None,
        SanitizedText::new("Cabecero de cama tapizado").unwrap(),
    );
    repo.create_quote(&other).unwrap();

    let tracked = repo
        .get_quote_by_public_id(request.public_id)
        .unwrap()
        .unwrap();
    assert_eq!(tracked.id, quote.id);

    let reviewed = repo
        .review_quote(
            quote.id,
            &QuoteReview {
                status: QuoteStatus::Approved,
                estimate: Some(Cents::new(32_000).unwrap()),
            },
        )
        .unwrap();
    assert_eq!(reviewed.status, QuoteStatus::Approved);
    assert_eq!(reviewed.estimate, Some(Cents::new(32_000).unwrap()));

    let (total, mine) = repo
        .list_quotes(
            QuoteListQuery::default().email(EmailAddress::new("carmen@example.com").unwrap()),
        )
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(mine[0].id, quote.id);

    let (approved, _) = repo
        .list_quotes(QuoteListQuery::default().status(QuoteStatus::Approved))
        .unwrap();
    assert_eq!(approved, 1);

    repo.delete_quote(quote.id).unwrap();
    assert!(repo.get_quote_by_id(quote.id).unwrap().is_none());
}

#[test]
fn test_job_filters_and_client_job_count() {
    let test_db = common::TestDb::new("test_job_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let ana = repo.create_client(&new_client("Ana Ruiz", None)).unwrap();
    let luis = repo.create_client(&new_client("Luis Gil", None)).unwrap();

    let sofa = repo.create_job(&new_job(ana.id, "Sofá tres plazas")).unwrap();
    repo.create_job(&new_job(ana.id, "Butaca orejera")).unwrap();
    repo.create_job(&new_job(luis.id, "Banco de entrada")).unwrap();

    assert_eq!(repo.count_client_jobs(ana.id).unwrap(), 2);

    let (by_client, _) = repo
        .list_jobs(JobListQuery::default().client(luis.id))
        .unwrap();
    assert_eq!(by_client, 1);

    let (by_client_name, _) = repo
        .list_jobs(JobListQuery::default().search("Ruiz"))
        .unwrap();
    assert_eq!(by_client_name, 2);

    let mut changes = new_job(ana.id, "Sofá tres plazas");
    changes.status = JobStatus::InProgress;
    repo.update_job(sofa.id, &changes).unwrap();

    let (in_progress, jobs) = repo
        .list_jobs(JobListQuery::default().status(JobStatus::InProgress))
        .unwrap();
    assert_eq!(in_progress, 1);
    assert_eq!(jobs[0].id, sofa.id);

    let missing_client = repo.create_job(&new_job(ClientId::new(999).unwrap(), "Silla"));
    assert!(matches!(
        missing_client,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}
