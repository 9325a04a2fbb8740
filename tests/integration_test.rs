// Integration tests for SeatX
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seatx_core::{InterestVector, Participant, PartitionConfig, Partitioner, Registration, Vocabulary};
use seatx_storage::StorageManager;

fn person(name: &str, flags: &[u8]) -> Participant {
    Participant::new(
        name,
        format!("{}@example.com", name.to_lowercase()),
        InterestVector::from_flags(flags),
    )
}

fn vocab(dim: usize) -> Vocabulary {
    Vocabulary::new((0..dim).map(|i| format!("interest-{}", i))).unwrap()
}

/// `n` participants picking 3 to 5 of the 12 default interests
fn random_participants(n: usize, seed: u64) -> Vec<Participant> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let picks = rng.random_range(3..=5);
            let mut flags = [0u8; 12];
            for idx in rand::seq::index::sample(&mut rng, 12, picks).into_vec() {
                flags[idx] = 1;
            }
            person(&format!("guest{}", i), &flags)
        })
        .collect()
}

#[test]
fn test_pairs_with_identical_interests_sit_together() {
    let people = vec![
        person("Ana", &[1, 1, 1, 0, 0, 0]),
        person("Bruno", &[1, 1, 1, 0, 0, 0]),
        person("Carla", &[0, 0, 0, 1, 1, 1]),
        person("Diego", &[0, 0, 0, 1, 1, 1]),
    ];
    let result = Partitioner::new(vocab(6), PartitionConfig::new(2, 2))
        .partition(&people)
        .unwrap();

    let labels = result.labels();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[2], labels[3]);
    assert_ne!(labels[0], labels[2]);
    assert!(result.balance.moves.is_empty());
    assert!(!result.has_capacity_warning());
    assert!(result.deficient.is_empty());
}

#[test]
fn test_capacity_shortfall_reports_excess() {
    let people = vec![
        person("Ana", &[1, 1, 0, 0]),
        person("Bruno", &[1, 1, 0, 0]),
        person("Carla", &[1, 0, 1, 0]),
        person("Diego", &[0, 0, 1, 1]),
        person("Elena", &[0, 0, 1, 1]),
    ];
    let result = Partitioner::new(vocab(4), PartitionConfig::new(2, 2))
        .partition(&people)
        .unwrap();

    assert_eq!(result.assignments.len(), 5);
    assert!(result.has_capacity_warning());
    assert_eq!(result.balance.unresolved_excess, 1);
    assert_eq!(result.sizes().iter().sum::<usize>(), 5);
    assert!(result.sizes().iter().all(|&s| s >= 2));
}

#[test]
fn test_duplicate_email_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = StorageManager::open(temp_dir.path(), Vocabulary::default()).unwrap();
    let form = Registration::new(
        "Ana",
        "ana@example.com",
        vec!["Startups".into(), "Fintech".into(), "Criptomonedas".into()],
    );

    storage.register(&form).unwrap();
    let err = storage.register(&form).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(storage.participants().unwrap().len(), 1);
}

#[test]
fn test_isolated_participants_are_flagged() {
    let people = vec![
        person("Ana", &[1, 1, 0, 0, 0, 0]),
        person("Bruno", &[1, 1, 0, 0, 0, 0]),
        person("Carla", &[0, 0, 1, 0, 0, 0]),
        person("Diego", &[0, 0, 0, 0, 0, 1]),
    ];
    let result = Partitioner::new(vocab(6), PartitionConfig::new(2, 2))
        .partition(&people)
        .unwrap();

    assert_eq!(result.deficient, vec!["Carla".to_string(), "Diego".to_string()]);
}

#[test]
fn test_blank_participant_never_flagged() {
    let people = vec![
        person("Ana", &[1, 0, 0]),
        person("Bruno", &[1, 0, 0]),
        person("Nadie", &[0, 0, 0]),
    ];
    let result = Partitioner::new(vocab(3), PartitionConfig::new(2, 2))
        .partition(&people)
        .unwrap();
    assert!(!result.deficient.contains(&"Nadie".to_string()));
    let nadie = &result.assignments[2];
    assert_eq!(nadie.summary, "Sin intereses comunes");
}

#[test]
fn test_every_participant_gets_exactly_one_table() {
    let people = random_participants(30, 11);
    let result = Partitioner::new(Vocabulary::default(), PartitionConfig::new(5, 7))
        .partition(&people)
        .unwrap();

    assert_eq!(result.assignments.len(), people.len());
    for (assignment, participant) in result.assignments.iter().zip(&people) {
        assert_eq!(&assignment.participant, participant);
        assert!(assignment.table < 5);
    }

    let seated: usize = result.iter_tables().map(|t| t.len()).sum();
    assert_eq!(seated, people.len());
    assert!(!result.has_capacity_warning());
    assert!(result.sizes().iter().all(|&s| s <= 7));
}

#[test]
fn test_unavoidable_excess_matches_shortfall() {
    let people = random_participants(30, 3);
    let result = Partitioner::new(Vocabulary::default(), PartitionConfig::new(4, 6))
        .partition(&people)
        .unwrap();

    assert_eq!(result.balance.unresolved_excess, 30 - 4 * 6);
    assert!(result.sizes().iter().all(|&s| s >= 6));
}

#[test]
fn test_same_seed_same_tables() {
    let people = random_participants(25, 99);
    let config = PartitionConfig::new(4, 8).with_seed(1234);

    let a = Partitioner::new(Vocabulary::default(), config).partition(&people).unwrap();
    let b = Partitioner::new(Vocabulary::default(), config).partition(&people).unwrap();
    assert_eq!(a.initial_labels, b.initial_labels);
    assert_eq!(a.labels(), b.labels());
    assert_eq!(a.deficient, b.deficient);
}

#[test]
fn test_register_assign_and_save() {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = StorageManager::open(temp_dir.path(), Vocabulary::default()).unwrap();

    let forms = [
        ("Ana", "ana@x.y", ["Startups", "Fintech", "Criptomonedas"]),
        ("Luis", "luis@x.y", ["Startups", "Fintech", "IA en Finanzas"]),
        ("Eva", "eva@x.y", ["Growth Hacking", "Fondos de Inversión", "Inversiones sostenibles"]),
        ("Raúl", "raul@x.y", ["Growth Hacking", "Fondos de Inversión", "Capital de riesgo"]),
    ];
    for (name, email, interests) in forms {
        let form = Registration::new(name, email, interests.iter().map(|s| s.to_string()).collect());
        storage.register(&form).unwrap();
    }

    let participants = storage.participants().unwrap();
    let result = Partitioner::new(storage.vocabulary().clone(), PartitionConfig::new(2, 2))
        .partition(&participants)
        .unwrap();
    storage.save_assignment(&result).unwrap();

    let text = std::fs::read_to_string(storage.assignments_path()).unwrap();
    assert!(text.lines().next().unwrap().ends_with(",Mesa,Intereses"));
    assert_eq!(text.lines().count(), 5);

    let labels = result.labels();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[2], labels[3]);
}

#[test]
fn test_corrupt_store_aborts_partitioning() {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = StorageManager::open(temp_dir.path(), Vocabulary::new(["a", "b"]).unwrap()).unwrap();
    std::fs::write(
        storage.registrations().path(),
        "Nombre,Email,a,b\nAna,ana@x.y,1,0\nLuis,luis@x.y,1,2\n",
    )
    .unwrap();

    let err = storage.participants().unwrap_err();
    assert!(err.is_data_integrity());
}

#[test]
fn test_too_few_participants() {
    let people = vec![person("Ana", &[1, 0])];
    let err = Partitioner::new(vocab(2), PartitionConfig::new(2, 1))
        .partition(&people)
        .unwrap_err();
    assert!(err.is_precondition());

    let err = Partitioner::new(vocab(2), PartitionConfig::new(2, 1))
        .partition(&[])
        .unwrap_err();
    assert!(err.is_precondition());
}
