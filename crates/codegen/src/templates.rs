use std::collections::HashMap;

use handlebars::{no_escape, Handlebars};
use tendril_core::{TendrilError, TendrilResult};

/// Named templates rendered through handlebars in strict mode, so a
/// placeholder without a value is an error rather than an empty string.
/// Output is Ruby source, so HTML escaping is turned off.
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);

        Self { handlebars }
    }

    /// Registry holding every template the generators use.
    pub fn builtin() -> TendrilResult<Self> {
        let mut registry = Self::new();
        for (id, template) in BUILTIN_TEMPLATES {
            registry.register(id, template)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, id: &str, template: &str) -> TendrilResult<()> {
        self.handlebars
            .register_template_string(id, template)
            .map_err(|e| TendrilError::Template {
                message: format!("Failed to register {} template: {}", id, e),
            })
    }

    pub fn render(&self, id: &str, vars: &HashMap<&str, String>) -> TendrilResult<String> {
        if !self.handlebars.has_template(id) {
            return Err(TendrilError::TemplateNotFound { id: id.to_string() });
        }

        self.handlebars
            .render(id, vars)
            .map_err(|e| TendrilError::Template {
                message: format!("Failed to render {} template: {}", id, e),
            })
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub const BUILTIN_TEMPLATES: [(&str, &str); 16] = [
    ("entity", ENTITY_TEMPLATE),
    ("repository", REPOSITORY_TEMPLATE),
    ("index_action", INDEX_ACTION_TEMPLATE),
    ("show_action", SHOW_ACTION_TEMPLATE),
    ("new_action", NEW_ACTION_TEMPLATE),
    ("create_action", CREATE_ACTION_TEMPLATE),
    ("edit_action", EDIT_ACTION_TEMPLATE),
    ("update_action", UPDATE_ACTION_TEMPLATE),
    ("destroy_action", DESTROY_ACTION_TEMPLATE),
    ("action", ACTION_TEMPLATE),
    ("view", VIEW_TEMPLATE),
    ("view_template", VIEW_TEMPLATE_TEMPLATE),
    ("action_spec_minitest", ACTION_SPEC_MINITEST_TEMPLATE),
    ("action_spec_rspec", ACTION_SPEC_RSPEC_TEMPLATE),
    ("view_spec_minitest", VIEW_SPEC_MINITEST_TEMPLATE),
    ("view_spec_rspec", VIEW_SPEC_RSPEC_TEMPLATE),
];

pub const ENTITY_TEMPLATE: &str = r#"require "lotus/entity"

class {{class_name}}
  include Lotus::Entity
end
"#;

pub const REPOSITORY_TEMPLATE: &str = r#"require "lotus/repository"

class {{class_name}}Repository
  include Lotus::Repository
end
"#;

pub const INDEX_ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class Index
    include {{app_class}}::Action

    expose :{{name}}

    def call(params)
      @{{name}} = {{class_name}}Repository.all
    end
  end
end
"#;

pub const SHOW_ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class Show
    include {{app_class}}::Action

    expose :{{name}}

    def call(params)
      @{{name}} = {{class_name}}Repository.find(params[:id])
    end
  end
end
"#;

pub const NEW_ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class New
    include {{app_class}}::Action

    expose :{{name}}

    def call(params)
      @{{name}} = {{class_name}}.new
    end
  end
end
"#;

pub const CREATE_ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class Create
    include {{app_class}}::Action

    def call(params)
      @{{name}} = {{class_name}}.new({{name}}_params)
      {{class_name}}Repository.persist(@{{name}})

      redirect_to '/{{name}}'
    end

    private

    def {{name}}_params
      params[:{{name}}]
    end
  end
end
"#;

pub const EDIT_ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class Edit
    include {{app_class}}::Action

    expose :{{name}}

    def call(params)
      @{{name}} = {{class_name}}Repository.find(params[:id])
    end
  end
end
"#;

pub const UPDATE_ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class Update
    include {{app_class}}::Action

    def call(params)
      @{{name}} = {{class_name}}Repository.find(params[:id])
      @{{name}}.update({{name}}_params)
      {{class_name}}Repository.update(@{{name}})

      redirect_to '/{{name}}'
    end

    private

    def {{name}}_params
      params[:{{name}}]
    end
  end
end
"#;

pub const DESTROY_ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class Destroy
    include {{app_class}}::Action

    def call(params)
      @{{name}} = {{class_name}}Repository.find(params[:id])
      {{class_name}}Repository.delete(@{{name}})

      redirect_to '/{{name}}'
    end
  end
end
"#;

pub const ACTION_TEMPLATE: &str = r#"module {{app_class}}::Controllers::{{class_name}}
  class {{action_class}}
    include {{app_class}}::Action

    def call(params)
    end
  end
end
"#;

pub const VIEW_TEMPLATE: &str = r#"module {{app_class}}::Views::{{class_name}}
  class {{action_class}}
    include {{app_class}}::View
  end
end
"#;

pub const VIEW_TEMPLATE_TEMPLATE: &str = "";

pub const ACTION_SPEC_MINITEST_TEMPLATE: &str = r#"require 'spec_helper'
require_relative '../../../../{{apps_path}}/{{app}}/controllers/{{name}}/{{action}}'

describe {{app_class}}::Controllers::{{class_name}}::{{action_class}} do
  let(:action) { {{app_class}}::Controllers::{{class_name}}::{{action_class}}.new }
  let(:params) { Hash[] }

  it "is successful" do
    response = action.call(params)
    response[0].must_equal 200
  end
end
"#;

pub const ACTION_SPEC_RSPEC_TEMPLATE: &str = r#"require 'spec_helper'
require_relative '../../../../{{apps_path}}/{{app}}/controllers/{{name}}/{{action}}'

describe {{app_class}}::Controllers::{{class_name}}::{{action_class}} do
  let(:action) { {{app_class}}::Controllers::{{class_name}}::{{action_class}}.new }
  let(:params) { Hash[] }

  it "is successful" do
    response = action.call(params)
    expect(response[0]).to eq 200
  end
end
"#;

pub const VIEW_SPEC_MINITEST_TEMPLATE: &str = r#"require 'spec_helper'
require_relative '../../../../{{apps_path}}/{{app}}/views/{{name}}/{{action}}'

describe {{app_class}}::Views::{{class_name}}::{{action_class}} do
  let(:exposures) { Hash[foo: 'bar'] }
  let(:template)  { Lotus::View::Template.new('{{apps_path}}/{{app}}/templates/{{name}}/{{action}}.html.erb') }
  let(:view)      { {{app_class}}::Views::{{class_name}}::{{action_class}}.new(template, exposures) }

  it "exposes #foo" do
    view.foo.must_equal exposures.fetch(:foo)
  end
end
"#;

pub const VIEW_SPEC_RSPEC_TEMPLATE: &str = r#"require 'spec_helper'
require_relative '../../../../{{apps_path}}/{{app}}/views/{{name}}/{{action}}'

describe {{app_class}}::Views::{{class_name}}::{{action_class}} do
  let(:exposures) { Hash[foo: 'bar'] }
  let(:template)  { Lotus::View::Template.new('{{apps_path}}/{{app}}/templates/{{name}}/{{action}}.html.erb') }
  let(:view)      { {{app_class}}::Views::{{class_name}}::{{action_class}}.new(template, exposures) }

  it "exposes #foo" do
    expect(view.foo).to eq exposures.fetch(:foo)
  end
end
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn user_vars() -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        vars.insert("app", "web".to_string());
        vars.insert("app_class", "Web".to_string());
        vars.insert("apps_path", "apps".to_string());
        vars.insert("name", "user".to_string());
        vars.insert("class_name", "User".to_string());
        vars
    }

    #[test]
    fn test_render_entity_and_repository() {
        let registry = TemplateRegistry::builtin().unwrap();

        let entity = registry.render("entity", &user_vars()).unwrap();
        assert!(entity.contains("class User\n  include Lotus::Entity\nend"));

        let repository = registry.render("repository", &user_vars()).unwrap();
        assert!(repository.contains("class UserRepository\n  include Lotus::Repository\nend"));
    }

    #[test]
    fn test_render_create_action() {
        let registry = TemplateRegistry::builtin().unwrap();
        let content = registry.render("create_action", &user_vars()).unwrap();

        assert!(content.starts_with("module Web::Controllers::User\n  class Create\n"));
        assert!(content.contains("      @user = User.new(user_params)\n"));
        assert!(content.contains("      UserRepository.persist(@user)\n"));
        assert!(content.contains("      redirect_to '/user'\n"));
        assert!(content.contains("    def user_params\n      params[:user]\n    end\n"));
    }

    #[test]
    fn test_values_are_inserted_verbatim() {
        let mut registry = TemplateRegistry::new();
        registry.register("path", "{{apps_path}}/{{name}}").unwrap();

        let mut vars = user_vars();
        vars.insert("apps_path", "{{name}}".to_string());
        for _ in 0..20 {
            assert_eq!(registry.render("path", &vars).unwrap(), "{{name}}/user");
        }

        vars.insert("apps_path", "<apps> & 'more'".to_string());
        assert_eq!(registry.render("path", &vars).unwrap(), "<apps> & 'more'/user");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let mut registry = TemplateRegistry::new();
        registry.register("partial", "class {{class_name}}{{suffix}}").unwrap();

        let err = registry.render("partial", &user_vars()).unwrap_err();
        assert!(matches!(err, TendrilError::Template { .. }));
    }

    #[test]
    fn test_unknown_template() {
        let registry = TemplateRegistry::builtin().unwrap();
        let err = registry.render("policy", &user_vars()).unwrap_err();
        assert!(matches!(err, TendrilError::TemplateNotFound { ref id } if id == "policy"));
    }

    #[test]
    fn test_registry_only_knows_what_was_registered() {
        let mut registry = TemplateRegistry::new();
        registry.register("entity", ENTITY_TEMPLATE).unwrap();

        assert!(registry.render("entity", &user_vars()).is_ok());
        assert!(matches!(
            registry.render("repository", &user_vars()),
            Err(TendrilError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_template_is_rejected() {
        let mut registry = TemplateRegistry::new();
        let err = registry.register("broken", "{{#if name}}never closed").unwrap_err();
        assert!(matches!(err, TendrilError::Template { .. }));
    }

    #[test]
    fn test_builtin_templates_render_with_full_context() {
        let registry = TemplateRegistry::builtin().unwrap();
        let mut vars = user_vars();
        vars.insert("action", "index".to_string());
        vars.insert("action_class", "Index".to_string());

        for (id, _) in BUILTIN_TEMPLATES {
            let content = registry.render(id, &vars).unwrap();
            assert!(!content.contains("{{"), "{} left a placeholder behind", id);
        }
    }
}
