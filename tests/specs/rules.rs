//! Rule specs: each rule's flagged and accepted forms, end to end.

use crate::prelude::*;

/// Rule ids reported for a single spec file (all rules at warning severity).
fn rules_for(source: &str) -> Vec<String> {
    let project = Project::with_defaults();
    project.file("spec/subject_spec.rb", source);
    check().pwd(project.path()).json().passes().rules()
}

#[test]
fn flat_example_ignores_adjective_connectives() {
    assert!(
        rules_for(
            "describe Book do\n  it 'returns the given title' do\n  end\n  it 'is charged once per day' do\n  end\nend\n"
        )
        .is_empty()
    );
}

#[test]
fn flat_example_inside_iterator_block() {
    assert_eq!(
        rules_for(
            "describe Reservation do\n  %w[a b].each do |kind|\n    it 'works when reserved' do\n    end\n  end\nend\n"
        ),
        vec!["flat-example"]
    );
}

#[test]
fn flat_example_top_level_vs_context() {
    assert_eq!(
        rules_for(
            "describe Reservation do\n  it 'raises an error when already reserved' do\n  end\nend\n"
        ),
        vec!["flat-example"]
    );
    assert!(
        rules_for(
            "describe Reservation do\n  context 'when already reserved' do\n    it 'raises an error' do\n    end\n  end\nend\n"
        )
        .is_empty()
    );
}

#[test]
fn single_level_context_nested_vs_flattened() {
    let nested = r#"describe Access do
  context 'when admin' do
    let(:role) { :admin }
    context 'when active' do
      let(:status) { :active }
      it { is_expected.to be_allowed }
    end
    context 'when locked' do
      let(:status) { :locked }
      it { is_expected.not_to be_allowed }
    end
  end
  context 'when guest' do
    let(:role) { :guest }
    context 'when active' do
      let(:status) { :active }
      it { is_expected.not_to be_allowed }
    end
    context 'when locked' do
      let(:status) { :locked }
      it { is_expected.not_to be_allowed }
    end
  end
end
"#;
    assert_eq!(rules_for(nested), vec!["single-level-context"]);

    let flattened = r#"describe Access do
  context 'when admin and active' do
    let(:role) { :admin }
    let(:status) { :active }
    it { is_expected.to be_allowed }
  end
  context 'when admin and locked' do
    let(:role) { :admin }
    let(:status) { :locked }
    it { is_expected.not_to be_allowed }
  end
  context 'when guest and active' do
    let(:role) { :guest }
    let(:status) { :active }
    it { is_expected.not_to be_allowed }
  end
  context 'when guest and locked' do
    let(:role) { :guest }
    let(:status) { :locked }
    it { is_expected.not_to be_allowed }
  end
end
"#;
    assert!(rules_for(flattened).is_empty());
}

#[test]
fn single_level_context_ignores_grouping_without_bindings() {
    let grouping = r#"describe Reservation do
  context '#reserve' do
    context 'with a member' do
      it 'succeeds' do
      end
    end
    context 'with a guest' do
      it 'fails' do
      end
    end
  end
  context '#cancel' do
    context 'with a member' do
      it 'succeeds' do
      end
    end
    context 'with a guest' do
      it 'fails' do
      end
    end
  end
end
"#;
    assert!(rules_for(grouping).is_empty());
}

#[test]
fn unnamed_subject_anonymous_vs_named() {
    assert_eq!(
        rules_for(
            r#"describe Book do
  subject { Book.new(title: 'Dune') }
  it 'has a title' do
    expect(subject.title).to eq('Dune')
  end
  it 'is available' do
    expect(subject).to be_available
  end
end
"#
        ),
        vec!["unnamed-subject"]
    );
    assert!(
        rules_for(
            r#"describe Book do
  subject(:book) { Book.new(title: 'Dune') }
  it 'has a title' do
    expect(book.title).to eq('Dune')
  end
  it 'is available' do
    expect(book).to be_available
  end
end
"#
        )
        .is_empty()
    );
}

#[test]
fn unnamed_subject_mixed_use_escalates_to_error() {
    let project = Project::with_defaults();
    project.file(
        "spec/reservation_spec.rb",
        r#"describe Reservation do
  subject { Reservation.create(book) }
  it 'creates a record' do
    expect { subject }.to change(Reservation, :count).by(1)
  end
  it 'is pending' do
    expect(subject.status).to eq(:pending)
  end
end
"#,
    );
    check()
        .pwd(project.path())
        .args(&["--suggest"])
        .fails()
        .stdout_has("spec/reservation_spec.rb:2: [unnamed-subject]")
        .stdout_has("    subject(:result) { Reservation.create(book) }");
}

#[test]
fn context_mutation_hook_vs_override() {
    assert_eq!(
        rules_for(
            r#"describe Book do
  let(:book) { Book.new }
  context 'when archived' do
    before { book.archived = true }
    it { expect(book).to be_hidden }
  end
end
"#
        ),
        vec!["context-mutation"]
    );
    assert!(
        rules_for(
            r#"describe Book do
  let(:book) { Book.new }
  context 'when archived' do
    let(:book) { Book.new(archived: true) }
    it { expect(book).to be_hidden }
  end
end
"#
        )
        .is_empty()
    );
}

#[test]
fn prefer_change_matcher_manual_vs_matcher() {
    assert_eq!(
        rules_for(
            r#"describe Cart do
  let(:cart) { Cart.new }
  it 'adds an item' do
    total = cart.items.size
    cart.add(:apple)
    expect(cart.items.size).to eq(total + 1)
  end
end
"#
        ),
        vec!["prefer-change-matcher"]
    );
    assert!(
        rules_for(
            r#"describe Cart do
  let(:cart) { Cart.new }
  it 'adds an item' do
    expect { cart.add(:apple) }.to change { cart.items.size }.by(1)
  end
end
"#
        )
        .is_empty()
    );
}

#[test]
fn shared_examples_are_reported_once_where_written() {
    let project = Project::with_defaults();
    project.file(
        "spec/book_spec.rb",
        r#"describe Book do
  shared_examples 'a record' do
    it 'fails when invalid' do
      expect(record).not_to be_valid
    end
  end

  it_behaves_like 'a record'
  it_behaves_like 'a record'
end
"#,
    );
    let run = check().pwd(project.path()).json().passes();
    let json = run.json();
    let findings = json["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["rule"], "flat-example");
    assert_eq!(findings[0]["line"], 3);
}
