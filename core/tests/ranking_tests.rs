use screener_core::ranker::rank as rank_with;
use screener_core::vectorizer::{cosine_similarity, vectorize};
use screener_core::{rank, Corpus, EngineConfig, IdfWeighting};

fn corpus(texts: &[&str]) -> Corpus {
    let cfg = EngineConfig::default();
    let mut c = Corpus::new();
    for (i, t) in texts.iter().enumerate() {
        c.add(format!("candidate-{i}"), *t, &cfg).unwrap();
    }
    c
}

#[test]
fn python_candidate_ranks_first() {
    let c = corpus(&["python developer with 3 years experience", "java architect 10+ years"]);
    let results = rank(&c, "python 3 years");
    assert!(!results.is_empty());
    assert_eq!(results[0].document_id, 0);
    assert_eq!(results[0].matched_skills.len(), 1);
    assert!(results[0].matched_skills.contains("python"));
    // the java architect shares no weighted term and no skill, so it falls under the threshold
    assert_eq!(results.len(), 1);
    assert!(results.iter().all(|r| r.document_id != 1));
    let query_skills = screener_core::extract_features("python 3 years").skills;
    assert!(c.get(1).unwrap().skills().intersection(&query_skills).is_empty());
}

#[test]
fn blank_query_returns_nothing() {
    let c = corpus(&["python", "java"]);
    assert!(rank(&c, "").is_empty());
    assert!(rank(&c, " \t\n").is_empty());
}

#[test]
fn self_match_is_maximal() {
    let texts = [
        "rust systems programmer tokio async networking",
        "pastry chef bread croissants",
        "gardener landscaping lawns hedges",
    ];
    let v = vectorize(&[texts[0], texts[1], texts[2], texts[0]], IdfWeighting::Standard);
    let query = &v.vectors[3];
    let own = cosine_similarity(query, &v.vectors[0]);
    assert!(own >= cosine_similarity(query, &v.vectors[1]));
    assert!(own >= cosine_similarity(query, &v.vectors[2]));

    let c = corpus(&texts);
    let results = rank(&c, texts[0]);
    assert_eq!(results[0].document_id, 0);
}

#[test]
fn matched_skills_are_a_subset_of_both_sides() {
    let c = corpus(&[
        "react redux typescript frontend, 4 years",
        "docker kubernetes aws devops engineer",
        "python pandas numpy data science",
    ]);
    let query = "looking for react and docker engineers with python";
    let query_skills = screener_core::extract_features(query).skills;
    for r in rank(&c, query) {
        let doc = c.get(r.document_id).unwrap();
        assert!(r.matched_skills.is_subset(doc.skills()));
        assert!(r.matched_skills.is_subset(&query_skills));
    }
}

#[test]
fn scores_stay_in_range_and_sorted() {
    let c = corpus(&[
        "aws aws aws docker",
        "aws docker kubernetes terraform",
        "docker",
        "completely unrelated text about birds",
        "",
    ]);
    let results = rank(&c, "aws docker kubernetes");
    for r in &results {
        assert!(r.score.is_finite());
        assert!(r.score > 10.0 && r.score <= 100.0);
    }
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn ties_keep_corpus_order() {
    let c = corpus(&["golang microservices", "golang microservices", "golang microservices"]);
    let results = rank(&c, "microservices");
    let ids: Vec<_> = results.iter().map(|r| r.document_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn ranking_does_not_touch_the_corpus() {
    let c = corpus(&["python", "sql"]);
    let before: Vec<_> = c.iter().map(|d| (d.id, d.skills().clone())).collect();
    let _ = rank(&c, "python sql");
    let after: Vec<_> = c.iter().map(|d| (d.id, d.skills().clone())).collect();
    assert_eq!(before, after);
}

#[test]
fn smoothed_idf_keeps_shared_terms() {
    let c = corpus(&["python", "python"]);
    let cfg = EngineConfig::default().with_idf(IdfWeighting::Smoothed);
    let results = rank_with(&c, "python", &cfg);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].score, 100.0);
    // with the standard idf every shared term weighs zero; only the bonus remains
    let standard = rank(&c, "python");
    assert!(standard.iter().all(|r| r.base_score == 0.0 && r.skill_bonus == 20.0));
}
