#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::finding::Severity;
use crate::parser::parse;
use yare::parameterized;

fn run(source: &str) -> Vec<Finding> {
    UnnamedSubject.check(&parse(source).unwrap(), &RuleConfig::default())
}

#[test]
fn flags_anonymous_subject_used_by_two_examples() {
    let findings = run(
        r#"describe Book do
  subject { Book.new(title: 'Dune') }

  it 'has a title' do
    expect(subject.title).to eq('Dune')
  end

  it 'is available' do
    expect(subject).to be_available
  end
end
"#,
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 2);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert!(findings[0].message.contains("referenced by 2 examples"));
    assert_eq!(
        findings[0].suggestion.as_deref(),
        Some("subject(:book) { Book.new(title: 'Dune') }")
    );
}

#[test]
fn named_subject_passes() {
    let findings = run(
        r#"describe Book do
  subject(:book) { Book.new(title: 'Dune') }

  it 'has a title' do
    expect(book.title).to eq('Dune')
  end

  it 'is available' do
    expect(subject).to be_available
  end
end
"#,
    );
    assert!(findings.is_empty());
}

#[test]
fn single_reference_passes() {
    let findings = run(
        "describe Book do\n  subject { Book.new }\n  it 'works' do\n    expect(subject).to be_valid\n  end\n  it { is_expected.to be_valid }\nend\n",
    );
    assert!(findings.is_empty());
}

#[test]
fn is_expected_is_not_an_explicit_reference() {
    let findings = run(
        "describe Book do\n  subject { Book.new }\n  it { is_expected.to be_valid }\n  it { is_expected.not_to be_lost }\nend\n",
    );
    assert!(findings.is_empty());
}

#[test]
fn side_effect_then_query_escalates() {
    let findings = run(
        r#"describe Reservation do
  subject { described_class.create(book: book) }

  it 'reserves the book' do
    subject
    expect(book).to be_reserved
  end

  it 'returns the reservation' do
    expect(subject.book).to eq(book)
  end
end
"#,
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0].message.contains("side effect"));
    assert_eq!(
        findings[0].suggestion.as_deref(),
        Some("subject(:result) { described_class.create(book: book) }")
    );
}

#[test]
fn escalation_starts_from_configured_severity() {
    let tree = parse(
        "describe X do\n  subject { X.run }\n  it 'a' do\n    expect { subject }.to change { X.count }\n  end\n  it 'b' do\n    expect(subject[:ok]).to be true\n  end\nend\n",
    )
    .unwrap();
    let config = RuleConfig {
        severity: Some(Severity::Info),
        ..RuleConfig::default()
    };
    let findings = UnnamedSubject.check(&tree, &config);
    assert_eq!(findings[0].severity, Severity::Warning);
}

#[test]
fn nearer_named_subject_shadows_anonymous_one() {
    let findings = run(
        r#"describe Book do
  subject { Book.new }

  context 'when borrowed' do
    subject(:loan) { Loan.new }

    it 'a' do
      expect(subject).to be_active
    end

    it 'b' do
      expect(subject.book).to be_present
    end
  end
end
"#,
    );
    assert!(findings.is_empty());
}

#[test]
fn references_from_nested_contexts_count() {
    let findings = run(
        r#"describe Book do
  subject { Book.new }

  context 'when new' do
    it 'a' do
      expect(subject).to be_new
    end
  end

  context 'when old' do
    it 'b' do
      expect(subject).not_to be_new
    end
  end
end
"#,
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 2);
}

#[parameterized(
    bare = { &["subject"], true, false },
    block = { &["expect { subject }.to change(Book, :count)"], true, false },
    query_call = { &["expect(subject).to be_valid"], false, true },
    method = { &["subject.reload"], false, true },
    both = { &["subject", "expect(subject.id).to be"], true, true },
)]
fn classifies_usage(statements: &[&str], side_effect: bool, query: bool) {
    let usage = classify(statements.iter().copied()).unwrap();
    assert_eq!(usage.side_effect, side_effect);
    assert_eq!(usage.query, query);
}

#[test]
fn unrelated_words_are_not_references() {
    assert!(classify(["subject_line = 1", "mail.subject", ":subject"].into_iter()).is_none());
}

#[parameterized(
    class = { "Book.new", "book" },
    namespaced = { "Library::BookLoan.new(user)", "book_loan" },
    other = { "build(:book)", "result" },
)]
fn suggests_names(expr: &str, expected: &str) {
    assert_eq!(suggest_name(expr), expected);
}
