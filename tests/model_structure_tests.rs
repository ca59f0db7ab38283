//! End-to-end checks of Ruby model sources through the tree-sitter front end
use std::collections::BTreeMap;

use model_structure_lint::rule::{Category, Offense, OffenseKind, RuleConfig, RuleSettings};
use model_structure_lint::check_source;

fn check(source: &str, config: &RuleConfig) -> Vec<Offense> {
    check_source(source, config).expect("parse ruby")
}

fn kinds(offenses: &[Offense]) -> Vec<OffenseKind> {
    offenses.iter().map(|o| o.kind).collect()
}

/// Default settings with `serialize` as a misc method
fn default_with_misc() -> RuleConfig {
    RuleConfig::from_settings(&RuleSettings {
        misc_method_names: Some(vec!["serialize".to_string()]),
        ..Default::default()
    })
    .expect("valid settings")
}

/// Given order, no required comments
fn order_only(order: &[&str]) -> RuleConfig {
    RuleConfig::from_settings(&RuleSettings {
        required_order: Some(order.iter().map(|s| s.to_string()).collect()),
        required_comments: Some(BTreeMap::new()),
        misc_method_names: None,
    })
    .expect("valid settings")
}

const WELL_FORMED: &str = r#"class User < ApplicationRecord
  # Modules
  module Roles
    ADMIN = "admin"
  end

  # Includes
  include Trackable

  # Enums
  enum status: { active: 0, archived: 1 }

  # Constants
  MAX_NAME = 64

  # Relationships
  belongs_to :team
  has_many :posts

  # Validations
  validates :name, presence: true
  validate do
    errors.add(:base, "banned") if banned?
  end

  # Scopes
  scope :active, -> { where(status: :active) }

  # Attributes
  attr_accessor :nickname

  # Callbacks
  after_save :touch_team

  serialize :preferences

  def initialize(*)
    super
  end

  def self.search(term)
    where(name: term)
  end

  def display_name
    name.titleize
  end

  private

  def touch_team
    team.touch
  end
end
"#;

#[test]
fn test_full_model_in_required_order_is_clean() {
    let offenses = check(WELL_FORMED, &default_with_misc());
    assert!(offenses.is_empty(), "unexpected offenses: {:#?}", offenses);
}

#[test]
fn test_check_is_repeatable() {
    let source = "class Foo < ApplicationRecord\n  # wrong\n  scope :a\n  belongs_to :b\nend\n";
    let config = RuleConfig::default();
    assert_eq!(check(source, &config), check(source, &config));
}

#[test]
fn test_single_order_violation_at_breaking_node() {
    let source = r#"class Foo < ApplicationRecord
  scope :recent, -> { order(created_at: :desc) }
  belongs_to :bar
  has_many :bazs
end
"#;
    let offenses = check(source, &order_only(&["association", "scope"]));

    assert_eq!(kinds(&offenses), vec![OffenseKind::Order]);
    assert_eq!(offenses[0].line(), 3);
    assert_eq!(
        offenses[0].message,
        "Model elements must appear in order:\n* association\n* scope\n\nObserved order:\n* scope\n* association\n"
    );
}

#[test]
fn test_later_repeats_do_not_break_order() {
    let source = r#"class Foo < ApplicationRecord
  belongs_to :bar
  scope :recent
  belongs_to :baz
end
"#;
    assert!(check(source, &order_only(&["association", "scope"])).is_empty());
}

#[test]
fn test_wrong_comment_names_expected_text() {
    let source = "class Foo < ApplicationRecord\n  # wrong\n  belongs_to :bar\nend\n";
    let offenses = check(source, &RuleConfig::default());

    assert_eq!(kinds(&offenses), vec![OffenseKind::Comment]);
    assert_eq!(offenses[0].line(), 3);
    assert_eq!(
        offenses[0].message,
        "Expected preceding comment: \"# Relationships\""
    );
}

#[test]
fn test_missing_comment_reported_on_first_occurrence_only() {
    let source = r#"class Foo < ApplicationRecord
  belongs_to :bar
  has_many :bazs
  has_one :qux
end
"#;
    let offenses = check(source, &RuleConfig::default());

    assert_eq!(kinds(&offenses), vec![OffenseKind::Comment]);
    assert_eq!(offenses[0].line(), 2);
}

#[test]
fn test_comment_with_trailing_whitespace_matches() {
    let source = "class Foo < ApplicationRecord\n  # Relationships   \n  belongs_to :bar\nend\n";
    assert!(check(source, &RuleConfig::default()).is_empty());
}

#[test]
fn test_comment_above_block_call() {
    let source = r#"class Foo < ApplicationRecord
  # Validations
  validate { errors.add(:base, "invalid") }
  # Scopes
  scope :visible, -> { all }
end
"#;
    assert!(check(source, &RuleConfig::default()).is_empty());
}

#[test]
fn test_comment_above_do_block_callback() {
    let source = r#"class Foo < ApplicationRecord
  # Callbacks
  after_save do
    touch
  end
  serialize :prefs
end
"#;
    assert!(check(source, &default_with_misc()).is_empty());
}

#[test]
fn test_grouping_helper_member_inherits_comment() {
    let source = r#"class Foo < ApplicationRecord
  # Relationships
  with_options dependent: :destroy do |l|
    l.has_one :foo
  end
end
"#;
    assert!(check(source, &RuleConfig::default()).is_empty());
}

#[test]
fn test_grouping_helper_with_several_members() {
    let source = r#"class Foo < ApplicationRecord
  # Relationships
  with_options dependent: :destroy do |l|
    l.has_one :foo
    l.has_many :bars
  end

  # Validations
  validates :name, presence: true
end
"#;
    assert!(check(source, &RuleConfig::default()).is_empty());
}

#[test]
fn test_grouping_helper_members_take_part_in_order() {
    let source = r#"class Foo < ApplicationRecord
  scope :recent
  with_options dependent: :destroy do |l|
    l.has_one :foo
    l.has_many :bars
  end
end
"#;
    let offenses = check(source, &order_only(&["association", "scope"]));

    assert_eq!(kinds(&offenses), vec![OffenseKind::Order]);
    assert_eq!(offenses[0].line(), 4);
}

#[test]
fn test_nothing_after_private_is_checked() {
    let source = r#"class Foo < ApplicationRecord
  # Scopes
  scope :recent

  private

  belongs_to :bar
  validates :name
end
"#;
    assert!(check(source, &RuleConfig::default()).is_empty());
}

#[test]
fn test_private_with_arguments_is_an_ordinary_call() {
    let source = r#"class Foo < ApplicationRecord
  # Scopes
  scope :recent
  private :helper
  belongs_to :bar
end
"#;
    let offenses = check(source, &RuleConfig::default());

    assert_eq!(kinds(&offenses), vec![OffenseKind::Comment, OffenseKind::Order]);
    assert!(offenses.iter().all(|o| o.line() == 5));
}

#[test]
fn test_private_inside_method_body_ends_checking() {
    // The marker is recognised before the nesting filter, wherever it sits
    let source = r#"class Foo < ApplicationRecord
  # Scopes
  scope :recent

  def reset
    private
  end

  belongs_to :bar
end
"#;
    assert!(check(source, &RuleConfig::default()).is_empty());
}

#[test]
fn test_private_inside_nested_module_ends_checking() {
    let source = r#"class Foo < ApplicationRecord
  # Scopes
  scope :recent

  # Modules
  module Helpers
    private
  end

  belongs_to :bar
end
"#;
    let offenses = check(source, &RuleConfig::default());

    // Only the module itself is checked: it comes after the scope
    assert_eq!(kinds(&offenses), vec![OffenseKind::Order]);
    assert_eq!(offenses[0].line(), 6);
}

#[test]
fn test_nested_declarations_are_ignored() {
    let source = r#"class Foo < ApplicationRecord
  # Relationships
  belongs_to :bar

  if Rails.env.test?
    scope :debug
  end

  def rebuild
    has_many :temporary
  end

  # Modules
  module Helpers
    include Comparable
  end
end
"#;
    let offenses = check(source, &order_only(&["association", "scope", "module", "include"]));
    assert_eq!(kinds(&offenses), Vec::<OffenseKind>::new());
}

#[test]
fn test_module_after_association_is_out_of_order() {
    let source = r#"class Foo < ApplicationRecord
  belongs_to :bar
  module Helpers
  end
end
"#;
    let offenses = check(source, &order_only(&["module", "association"]));

    assert_eq!(kinds(&offenses), vec![OffenseKind::Order]);
    assert_eq!(offenses[0].line(), 3);
}

#[test]
fn test_methods_and_constructor_order() {
    let source = r#"class Foo < ApplicationRecord
  def name
  end

  def self.build
  end

  def initialize
  end
end
"#;
    let offenses = check(
        source,
        &order_only(&["constructor", "class_method", "instance_method"]),
    );

    assert_eq!(kinds(&offenses), vec![OffenseKind::Order]);
    assert_eq!(offenses[0].line(), 5);
    assert!(offenses[0]
        .message
        .ends_with("Observed order:\n* instance_method\n* class_method\n"));
}

#[test]
fn test_categories_outside_required_order_are_not_ordered() {
    let source = r#"class Foo < ApplicationRecord
  scope :recent
  belongs_to :bar
  scope :archived
  attr_reader :token
end
"#;
    assert!(check(source, &order_only(&["association", "attribute"])).is_empty());
}

#[test]
fn test_comment_required_for_category_outside_order() {
    let config = RuleConfig::new(
        [Category::Scope],
        [(Category::Association, "# Relationships".to_string())],
        Vec::<String>::new(),
    );
    let source = r#"class Foo < ApplicationRecord
  belongs_to :bar
  scope :recent
  has_many :bazs
end
"#;
    let offenses = check(source, &config);

    assert_eq!(kinds(&offenses), vec![OffenseKind::Comment]);
    assert_eq!(offenses[0].line(), 2);
}

#[test]
fn test_unknown_calls_are_ignored() {
    let source = r#"class Foo < ApplicationRecord
  # Relationships
  belongs_to :bar
  random_function_call(:arg)
  serialize :prefs, Array
end
"#;
    assert!(check(source, &RuleConfig::default()).is_empty());
}

#[test]
fn test_offense_span_covers_declaration() {
    let source = "class Foo < ApplicationRecord\n  has_many :bars\nend\n";
    let offenses = check(source, &RuleConfig::default());

    let span = offenses[0].span;
    assert_eq!(&source[span.start_byte..span.end_byte], "has_many :bars");
    assert_eq!(span.start.column, 2);
}

#[test]
fn test_source_with_syntax_errors_is_still_checked() {
    let source = "class Foo < ApplicationRecord\n  belongs_to :bar\n  def broken(\nend\n";
    assert!(check_source(source, &RuleConfig::default()).is_ok());
}
